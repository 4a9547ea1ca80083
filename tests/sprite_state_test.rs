use sprite_ngin::{
    Matrix4, SpriteState, Vector2, Vector3, Vector4, data_structures::transform::Transform,
};

#[test]
fn uniform_is_stable_without_changes() {
    let mut state = SpriteState::character();
    state.set_sprite_sheet(8, 4).unwrap();
    state.set_frame_index(12);
    state.set_scale(Vector3::new(32.0, 48.0, 1.0));
    state.set_translate(Vector3::new(100.0, 50.0, 0.0));
    state.set_scroll_offset(Vector2::new(0.25, 0.0));

    let first = state.to_uniform();
    let second = state.to_uniform();

    assert_eq!(first, second);
    assert_eq!(first.sheet_size, [8, 4]);
    assert_eq!(first.frame_index, 12);
    assert_eq!(first.scroll_offset, [0.25, 0.0]);
}

#[test]
fn model_matrix_scales_then_translates() {
    let mut state = SpriteState::new();
    state.set_scale(Vector3::new(2.0, 4.0, 1.0));
    state.set_translate(Vector3::new(10.0, 20.0, 0.0));

    let m: Matrix4<f32> = state.model_matrix();
    // Corner of the unit quad: scaled first, then moved.
    let corner = m * Vector4::new(0.5, 0.5, 0.0, 1.0);
    assert_eq!(corner, Vector4::new(11.0, 22.0, 0.0, 1.0));

    let uniform = state.to_uniform();
    let expected: [[f32; 4]; 4] = m.into();
    assert_eq!(uniform.model, expected);
}

#[test]
fn contains_checks_the_scaled_quad() {
    let mut state = SpriteState::new();
    state.set_scale(Vector3::new(20.0, 10.0, 1.0));
    state.set_translate(Vector3::new(100.0, 100.0, 0.0));

    assert!(state.contains(Vector2::new(100.0, 100.0)));
    assert!(state.contains(Vector2::new(110.0, 105.0)));
    assert!(!state.contains(Vector2::new(111.0, 100.0)));
    assert!(!state.contains(Vector2::new(100.0, 94.0)));
}

#[test]
fn mirrored_sprites_keep_their_bounds() {
    let transform = Transform {
        translate: Vector3::new(0.0, 0.0, 0.0),
        scale: Vector3::new(-4.0, 2.0, 1.0),
    };
    let (min, max) = transform.bounds();
    assert_eq!(min, Vector2::new(-2.0, -1.0));
    assert_eq!(max, Vector2::new(2.0, 1.0));
}

#[test]
fn invalid_sheet_leaves_the_old_one() {
    let mut state = SpriteState::new();
    state.set_sprite_sheet(4, 2).unwrap();

    assert!(state.set_sprite_sheet(0, 2).is_err());
    assert_eq!(state.sprite_sheet().columns(), 4);
    assert_eq!(state.sprite_sheet().rows(), 2);
}

#[test]
fn new_sprites_start_at_identity() {
    let state = SpriteState::default();
    assert_eq!(state.transform, Transform::new());
    assert_eq!(state.frame_index(), 0);
    assert_eq!(state.scroll_offset(), Vector2::new(0.0, 0.0));
    assert_eq!(state.to_uniform().sheet_size, [1, 1]);
}

#[test]
fn characters_refuse_sheets_too_small_for_the_walk_cycle() {
    let mut state = SpriteState::character();
    assert!(state.set_sprite_sheet(4, 4).is_err());
    assert!(state.set_sprite_sheet(8, 3).is_err());
    assert_eq!(state.sprite_sheet().columns(), 1);

    state.set_sprite_sheet(8, 4).unwrap();
    state.set_sprite_sheet(12, 5).unwrap();

    let mut prop = SpriteState::new();
    prop.set_sprite_sheet(4, 4).unwrap();
}

#[test]
fn sheet_size_is_uploaded_unchanged() {
    let mut state = SpriteState::new();
    state.set_sprite_sheet(i32::MAX as u32, 1).unwrap();
    assert_eq!(state.to_uniform().sheet_size, [i32::MAX, 1]);
}

#[test]
fn velocity_is_only_stored_on_characters() {
    let mut state = SpriteState::character();
    assert_eq!(state.velocity(), Some(Vector3::new(0.0, 0.0, 0.0)));
    assert!(state.set_velocity(Vector3::new(0.0, 2.0, 0.0)));
    assert_eq!(state.velocity(), Some(Vector3::new(0.0, 2.0, 0.0)));
}
