//! Identity-bearing records and lookups over them.

/// Something whose identity outlives its field values.
///
/// Rooms, service definitions and service selections are entities: two rooms
/// with identical rates are still different rooms, and a selection keeps its
/// id while its days and quantity are edited.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    fn same_identity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

/// First entry in `items` with the given id.
pub fn find_by_id<'a, E: Entity>(items: &'a [E], id: &E::Id) -> Option<&'a E> {
    items.iter().find(|item| item.id() == id)
}

pub fn find_by_id_mut<'a, E: Entity>(items: &'a mut [E], id: &E::Id) -> Option<&'a mut E> {
    items.iter_mut().find(|item| item.id() == id)
}

/// Index of the entry with the given id, for removal or replacement in place.
pub fn position_of<E: Entity>(items: &[E], id: &E::Id) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Slot {
        code: &'static str,
        label: &'static str,
    }

    impl Entity for Slot {
        type Id = &'static str;

        fn id(&self) -> &Self::Id {
            &self.code
        }
    }

    fn slots() -> Vec<Slot> {
        vec![
            Slot { code: "a", label: "first" },
            Slot { code: "b", label: "second" },
        ]
    }

    #[test]
    fn lookups_match_on_id_only() {
        let mut items = slots();
        assert_eq!(find_by_id(&items, &"b").map(|s| s.label), Some("second"));
        assert!(find_by_id(&items, &"z").is_none());
        assert_eq!(position_of(&items, &"b"), Some(1));

        find_by_id_mut(&mut items, &"a").unwrap().label = "renamed";
        assert_eq!(items[0].label, "renamed");
    }

    #[test]
    fn identity_ignores_other_fields() {
        let a = Slot { code: "a", label: "x" };
        let b = Slot { code: "a", label: "y" };
        assert!(a.same_identity(&b));
        assert!(!a.same_identity(&Slot { code: "b", label: "x" }));
    }
}
