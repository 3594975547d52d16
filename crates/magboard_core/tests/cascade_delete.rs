use magboard_core::{
    BoardService, LinkPattern, ModulePlacement, ModuleTypeRegistry, Store, DEFAULT_DASHBOARD_ID,
};

fn setup() -> (Store, ModuleTypeRegistry) {
    (Store::with_defaults(), ModuleTypeRegistry::default())
}

/// Builds a second board with two linked modules; returns
/// (board id, module ids, link id).
fn board_with_linked_modules(
    store: &mut Store,
    registry: &ModuleTypeRegistry,
) -> (String, Vec<String>, String) {
    let mut service = BoardService::new(store, registry);
    let board_id = service.create_dashboard("Second").unwrap();
    let first = service
        .add_module_to_dashboard(&board_id, "quote", ModulePlacement::default(), None)
        .unwrap();
    let second = service
        .add_module_to_dashboard(&board_id, "article", ModulePlacement::default(), None)
        .unwrap();
    let link_id = service
        .add_link(&first, &second, LinkPattern::DataProvider, None)
        .unwrap();
    (board_id, vec![first, second], link_id)
}

#[test]
fn permanent_board_survives_removal_attempts() {
    let (mut store, registry) = setup();
    let mut service = BoardService::new(&mut store, &registry);
    service.remove_dashboard(DEFAULT_DASHBOARD_ID).unwrap();
    service.remove_dashboard(DEFAULT_DASHBOARD_ID).unwrap();

    let state = store.state();
    assert!(state.dashboards.get(DEFAULT_DASHBOARD_ID).is_some());
    assert_eq!(
        state.dashboards.active_dashboard_id.as_deref(),
        Some(DEFAULT_DASHBOARD_ID)
    );
    // The seeded module's config space must be untouched: the guard short
    // circuits before any cascade step runs.
    assert!(state.dashboards.get(DEFAULT_DASHBOARD_ID).unwrap().module("m-1").is_some());
}

#[test]
fn cascade_purges_configs_links_and_board() {
    let (mut store, registry) = setup();
    let (board_id, module_ids, link_id) = board_with_linked_modules(&mut store, &registry);

    let mut service = BoardService::new(&mut store, &registry);
    service.remove_dashboard(&board_id).unwrap();

    let state = store.state();
    assert!(state.dashboards.get(&board_id).is_none());
    for module_id in &module_ids {
        assert!(state.module_configs.get(module_id).is_none());
    }
    assert!(state.module_links.get(&link_id).is_none());
    assert!(state
        .module_links
        .links
        .values()
        .all(|link| module_ids.iter().all(|id| !link.touches(id))));
}

#[test]
fn cascade_also_removes_links_into_other_boards() {
    let (mut store, registry) = setup();
    let (board_id, module_ids, _) = board_with_linked_modules(&mut store, &registry);

    // A link from a doomed module to a module on the permanent board.
    let mut service = BoardService::new(&mut store, &registry);
    let outsider = service
        .add_module_to_dashboard(DEFAULT_DASHBOARD_ID, "quote", ModulePlacement::default(), None)
        .unwrap();
    let cross_link = service
        .add_link(&module_ids[0], &outsider, LinkPattern::ActiveItemTracker, None)
        .unwrap();

    service.remove_dashboard(&board_id).unwrap();

    let state = store.state();
    assert!(state.module_links.get(&cross_link).is_none());
    assert!(state.module_configs.get(&outsider).is_some());
}

#[test]
fn removing_twice_matches_removing_once() {
    let (mut store, registry) = setup();
    let (board_id, _, link_id) = board_with_linked_modules(&mut store, &registry);

    let mut service = BoardService::new(&mut store, &registry);
    service.remove_dashboard(&board_id).unwrap();
    let after_first = store.state().clone();

    let mut service = BoardService::new(&mut store, &registry);
    service.remove_dashboard(&board_id).unwrap();
    service.remove_link(&link_id).unwrap();
    service.remove_link(&link_id).unwrap();
    assert_eq!(store.state(), &after_first);
}

#[test]
fn active_board_reselects_nearest_neighbour() {
    let (mut store, registry) = setup();
    let mut service = BoardService::new(&mut store, &registry);
    let second = service.create_dashboard("Second").unwrap();
    let third = service.create_dashboard("Third").unwrap();
    assert_eq!(second, "board-2");
    assert_eq!(third, "board-3");

    store
        .dispatch(magboard_core::Action::Dashboards(
            magboard_core::reducer::dashboards::DashboardAction::SetActive { id: third.clone() },
        ))
        .unwrap();

    let mut service = BoardService::new(&mut store, &registry);
    service.remove_dashboard(&third).unwrap();
    assert_eq!(
        store.state().dashboards.active_dashboard_id.as_deref(),
        Some("board-2")
    );
}

#[test]
fn removing_module_purges_its_config_and_links() {
    let (mut store, registry) = setup();
    let (board_id, module_ids, link_id) = board_with_linked_modules(&mut store, &registry);

    let mut service = BoardService::new(&mut store, &registry);
    service.remove_module(&board_id, &module_ids[0]).unwrap();

    let state = store.state();
    let board = state.dashboards.get(&board_id).unwrap();
    assert!(board.module(&module_ids[0]).is_none());
    assert!(board.module(&module_ids[1]).is_some());
    assert!(state.module_configs.get(&module_ids[0]).is_none());
    assert!(state.module_configs.get(&module_ids[1]).is_some());
    assert!(state.module_links.get(&link_id).is_none());
    // Layout entries for the removed module disappear at every breakpoint.
    for entries in board.layouts.values() {
        assert!(entries.iter().all(|entry| entry.i != module_ids[0]));
    }
}
