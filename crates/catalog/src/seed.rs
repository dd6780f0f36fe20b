//! Built-in catalog used when no catalog file is configured.

use staysync_core::{DomainResult, RoomId, ServiceId};

use crate::catalog::InMemoryCatalog;
use crate::room::Room;
use crate::service::{ServiceDefinition, ServiceType};

fn located(mut room: Room, building: &str, number: &str, description: &str) -> Room {
    room.building = Some(building.to_string());
    room.room_number = Some(number.to_string());
    room.description = Some(description.to_string());
    room
}

pub fn seed_rooms() -> DomainResult<Vec<Room>> {
    let mut pod = located(
        Room::new(RoomId::new("203")?, "미니멀리스트 팟", "싱글", 1, 1, 0, 50_000),
        "C동",
        "101호",
        "1인 여행자를 위한 실속형 공용 욕실 이용 객실입니다.",
    );
    pod.has_bathroom = false;

    Ok(vec![
        located(
            Room::new(RoomId::new("101")?, "스탠다드 오션", "트윈", 3, 2, 20_000, 80_000),
            "A동",
            "101호",
            "바다가 한눈에 보이는 아늑한 트윈룸입니다.",
        ),
        located(
            Room::new(RoomId::new("102")?, "스탠다드 가든", "트윈", 2, 2, 0, 75_000),
            "A동",
            "102호",
            "정원 전망의 조용한 객실입니다.",
        ),
        located(
            Room::new(RoomId::new("201")?, "디럭스 스위트", "퀸", 2, 2, 0, 120_000),
            "B동",
            "201호",
            "최고급 침구와 넓은 공간을 자랑하는 스위트룸입니다.",
        ),
        located(
            Room::new(RoomId::new("202")?, "패밀리 로프트", "복층", 6, 4, 25_000, 150_000),
            "B동",
            "202호",
            "가족 단위 여행객에게 적합한 넓은 복층 객실입니다.",
        ),
        pod,
    ])
}

pub fn seed_services() -> DomainResult<Vec<ServiceDefinition>> {
    Ok(vec![
        ServiceDefinition::new(ServiceId::new("s1")?, "렌트카", 50_000, ServiceType::Rental),
        ServiceDefinition::new(ServiceId::new("s2")?, "식사 (조식)", 10_000, ServiceType::Meal),
        ServiceDefinition::new(ServiceId::new("s3")?, "공항 픽업", 30_000, ServiceType::Pickup),
        ServiceDefinition::new(ServiceId::new("s4")?, "주말식사", 10_000, ServiceType::WeekendMeal),
        ServiceDefinition::new(ServiceId::new("s5")?, "출퇴근 셔틀", 5_000, ServiceType::Commute),
    ])
}

/// The default catalog: five rooms across three buildings and five services.
pub fn seed_catalog() -> DomainResult<InMemoryCatalog> {
    InMemoryCatalog::from_parts(seed_rooms()?, seed_services()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn seed_catalog_is_valid_and_complete() {
        let catalog = seed_catalog().unwrap();
        assert_eq!(catalog.rooms().len(), 5);
        assert_eq!(catalog.service_definitions().len(), 5);

        let loft = catalog.room(&"202".parse().unwrap()).unwrap();
        assert_eq!(loft.capacity, 6);
        assert_eq!(loft.base_capacity, 4);
        assert_eq!(loft.extra_person_price, 25_000);
    }

    #[test]
    fn every_service_type_but_custom_is_seeded() {
        let types: Vec<ServiceType> = seed_services().unwrap().iter().map(|s| s.service_type).collect();
        assert!(types.contains(&ServiceType::Pickup));
        assert!(types.contains(&ServiceType::WeekendMeal));
        assert!(types.contains(&ServiceType::Commute));
        assert!(!types.contains(&ServiceType::Custom));
    }
}
