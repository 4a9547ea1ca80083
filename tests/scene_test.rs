use sprite_ngin::{
    Behaviour, Character, Movement, Out, Scene, SpriteState, Vector2, Vector3, input::Action,
};

fn placed(x: f32, y: f32, size: f32) -> SpriteState {
    let mut state = SpriteState::new();
    state.set_translate(Vector3::new(x, y, 0.0));
    state.set_scale(Vector3::new(size, size, 1.0));
    state
}

fn walker() -> SpriteState {
    let character = Character::new().with_movement(Movement::PerTick);
    let mut state = placed(0.0, 0.0, 16.0).with_behaviour(Behaviour::VelocityDriven(character));
    state.set_sprite_sheet(8, 4).unwrap();
    state
}

#[test]
fn hit_test_prefers_the_topmost_sprite() {
    let mut scene: Scene<SpriteState> = Scene::new();
    let background = scene.push(placed(400.0, 300.0, 800.0));
    let prop = scene.push(placed(100.0, 100.0, 50.0));

    assert_eq!(scene.hit_test(Vector2::new(100.0, 100.0)), Some(prop));
    assert_eq!(scene.hit_test(Vector2::new(500.0, 500.0)), Some(background));
    assert_eq!(scene.hit_test(Vector2::new(900.0, 100.0)), None);
}

#[test]
fn only_velocity_driven_sprites_can_be_controlled() {
    let mut scene: Scene<SpriteState> = Scene::new();
    let prop = scene.push(placed(0.0, 0.0, 1.0));
    let hero = scene.push(walker());

    assert!(scene.control(prop).is_err());
    assert!(scene.control(7).is_err());
    assert_eq!(scene.controlled(), None);

    scene.control(hero).unwrap();
    assert_eq!(scene.controlled(), Some(hero));
}

#[test]
fn characters_on_small_sheets_cannot_be_controlled() {
    let mut scene: Scene<SpriteState> = Scene::new();
    let mut cramped = placed(0.0, 0.0, 16.0);
    cramped.set_sprite_sheet(4, 4).unwrap();
    let cramped = scene.push(cramped.with_behaviour(Behaviour::VelocityDriven(Character::new())));
    let single = scene.push(SpriteState::character());

    assert!(scene.control(cramped).is_err());
    assert!(scene.control(single).is_err());
    assert_eq!(scene.controlled(), None);
}

#[test]
fn key_presses_edit_the_controlled_velocity() {
    let mut scene: Scene<SpriteState> = Scene::new();
    let hero = scene.push(walker());
    scene.control(hero).unwrap();

    scene.handle_action(Action::MoveRight, true);
    scene.handle_action(Action::MoveUp, true);
    let velocity = scene.get(hero).and_then(|s| s.velocity());
    assert_eq!(velocity, Some(Vector3::new(1.0, 1.0, 0.0)));

    scene.handle_action(Action::MoveRight, false);
    scene.handle_action(Action::MoveUp, false);
    let velocity = scene.get(hero).and_then(|s| s.velocity());
    assert_eq!(velocity, Some(Vector3::new(0.0, 0.0, 0.0)));
}

#[test]
fn quit_is_reported_on_press() {
    let mut scene: Scene<SpriteState> = Scene::new();
    assert!(matches!(scene.handle_action(Action::Quit, true), Out::Exit));
    assert!(matches!(scene.handle_action(Action::Quit, false), Out::Empty));
    // Without a controlled sprite movement keys are ignored.
    assert!(matches!(
        scene.handle_action(Action::MoveLeft, true),
        Out::Empty
    ));
}

#[test]
fn update_advances_every_sprite() {
    let mut scene: Scene<SpriteState> = Scene::new();
    let prop = scene.push(placed(5.0, 5.0, 1.0));
    let hero = scene.push(walker());
    scene.control(hero).unwrap();
    scene.handle_action(Action::MoveLeft, true);

    scene.update(0.1);

    let hero = scene.get(hero).unwrap();
    assert_eq!(hero.transform.translate, Vector3::new(-1.0, 0.0, 0.0));
    assert_eq!(hero.frame_index(), 17);
    assert_eq!(
        scene.get(prop).unwrap().transform.translate,
        Vector3::new(5.0, 5.0, 0.0)
    );
}

#[test]
fn removing_sprites_keeps_markers_on_their_sprite() {
    let mut scene: Scene<SpriteState> = Scene::new();
    let first = scene.push(placed(0.0, 0.0, 10.0));
    let hero = scene.push(walker());
    scene.control(hero).unwrap();
    assert_eq!(scene.select_at(Vector2::new(0.0, 0.0)), Some(hero));

    scene.remove(first).unwrap();
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.controlled(), Some(0));
    assert_eq!(scene.selected(), Some(0));

    scene.remove(0).unwrap();
    assert!(scene.is_empty());
    assert_eq!(scene.controlled(), None);
    assert_eq!(scene.selected(), None);
    assert!(scene.remove(0).is_none());
}

#[test]
fn iteration_follows_insertion_order() {
    let mut scene: Scene<SpriteState> = Scene::default();
    for x in 0..4 {
        scene.push(placed(x as f32, 0.0, 1.0));
    }
    let xs: Vec<f32> = scene.iter().map(|s| s.transform.translate.x).collect();
    assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0]);

    scene
        .iter_mut()
        .for_each(|s| s.set_scroll_offset(Vector2::new(0.5, 0.0)));
    assert!(scene.iter().all(|s| s.scroll_offset().x == 0.5));
}
