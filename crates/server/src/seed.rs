//! Demo equipment seeding for in-memory deployments

use maintenance_lib::models::Equipment;
use maintenance_lib::store::InMemoryStore;

/// Register a small demo fleet and return how many entries were added
pub fn seed_demo_equipment(store: &InMemoryStore) -> usize {
    let fleet = [
        Equipment::new("SP-001", "Solar Pump A", "solar_pump"),
        Equipment::new("IR-002", "Irrigation Pump B", "irrigation_pump"),
        Equipment::new("TR-014", "Tractor North Field", "tractor"),
        Equipment::new("HV-003", "Harvester East", "harvester"),
    ];

    let count = fleet.len();
    for equipment in fleet {
        store.insert_equipment(equipment);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use maintenance_lib::store::MaintenanceStore;

    #[tokio::test]
    async fn test_seed_registers_fleet() {
        let store = InMemoryStore::new();
        let count = seed_demo_equipment(&store);

        assert_eq!(count, 4);
        let all = store.list_equipment().await.unwrap();
        assert_eq!(all.len(), 4);
        assert!(store.equipment_by_code("SP-001").await.unwrap().is_some());
    }
}
