//! A background, a few props and one walker steered with WASD. Escape quits.
//!
//! Images are read from `./assets` relative to the working directory. Missing files are
//! logged and drawn transparent.

use sprite_ngin::{
    Behaviour, Character, Config, GraphicsFlow, Scene, Sprite, Vector3,
    context::InitContext,
    flow::{FlowConstructor, run},
};

const PROPS: [(&str, f32, [f32; 2]); 5] = [
    ("samurai.png", 100.0, [100.0, 100.0]),
    ("hood_archer.png", 100.0, [300.0, 100.0]),
    ("monster0.png", 150.0, [200.0, 400.0]),
    ("monster1.png", 180.0, [600.0, 300.0]),
    ("monster2.png", 200.0, [600.0, 100.0]),
];

async fn build_scene(ctx: InitContext) -> anyhow::Result<Scene> {
    let mut scene = Scene::new();

    let mut background = Sprite::new(&ctx, "orig.png").await;
    background.state.set_scale(Vector3::new(800.0, 600.0, 1.0));
    background.state.set_translate(Vector3::new(400.0, 300.0, 0.0));
    scene.push(background);

    for (file, size, [x, y]) in PROPS {
        let mut prop = Sprite::new(&ctx, file).await;
        prop.state.set_scale(Vector3::new(size, size, 1.0));
        prop.state.set_translate(Vector3::new(x, y, 0.0));
        scene.push(prop);
    }

    let mut walker = Sprite::new(&ctx, "Sword_Run_full.png")
        .await
        .with_behaviour(Behaviour::VelocityDriven(Character::new()));
    walker.state.set_scale(Vector3::new(100.0, 100.0, 1.0));
    walker.state.set_translate(Vector3::new(400.0, 400.0, 0.0));
    walker.state.set_sprite_sheet(8, 4)?;
    let walker = scene.push(walker);
    scene.control(walker)?;

    Ok(scene)
}

fn main() -> anyhow::Result<()> {
    let scene: FlowConstructor = Box::new(|ctx| {
        Box::pin(async move {
            let flow: Box<dyn GraphicsFlow> = match build_scene(ctx).await {
                Ok(scene) => Box::new(scene),
                Err(e) => {
                    log::error!("Could not set up the scene: {}", e);
                    Box::new(Scene::<Sprite>::new())
                }
            };
            flow
        })
    });

    run(Config::default().with_title("character"), vec![scene])
}
