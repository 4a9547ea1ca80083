//! Flow control and application event loop.
//!
//! A "flow" is a self-contained part of the application that handles input, updates its
//! state and tells the engine what to draw each frame. [`Scene`](crate::scene::Scene) is
//! the flow this crate ships; custom flows implement [`GraphicsFlow`] directly.
//!
//! # User-facing types
//!
//! - [`GraphicsFlow`] is the trait for scenes/states that handle events and rendering
//! - [`Out`] is the output of every hook, used to configure the context or quit
//! - [`run`] opens the window and drives all flows until the window closes
//!
//! # Lifecycle Flow
//!
//! Every frame, on `RedrawRequested`:
//! 1. measure the time since the previous frame
//! 2. call `on_update` on all flows (sprites move, animate and upload their uniforms)
//! 3. collect `on_render` from all flows and draw them in order
//! 4. present the frame and request the next one
//!
//! Window events are passed to `on_window_events` as they arrive, between frames.

use std::{fmt::Debug, iter, pin::Pin, sync::Arc};

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    config::Config,
    context::{Context, InitContext},
    render::{Render, draw_renders},
};

///
/// This is the Output Type for every lifecycle hook.
///
/// `Out::Configure` can be used to modify the Context during runtime, for instance to
/// change the clear colour or the projection.
///
/// `Out::Exit` closes the window once the current frame is done.
///
/// `Empty` is the default output used when nothing needs to be handled.
///
/// `C` is what the configure closure receives; the engine always uses [`Context`].
///
pub enum Out<C = Context> {
    Configure(Box<dyn FnOnce(&mut C)>),
    Exit,
    Empty,
}

impl<C> Default for Out<C> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<C> Debug for Out<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configure(_) => f.write_str("Configure(|&mut Context| -> {...})"),
            Self::Exit => f.write_str("Exit"),
            Self::Empty => f.write_str("Empty"),
        }
    }
}

/// Trait for implementing a renderable scene or game state.
///
/// # Lifecycle
///
/// 1. `on_init()` is called once when the flow is created; configure context (clear colour, projection)
/// 2. `on_window_events()` is called for each winit window event
/// 3. `on_update()` is called every frame before rendering
/// 4. `on_render()` is called each frame and specifies how to render `self`
///
pub trait GraphicsFlow {
    /// Initialize the flow and configure the context.
    fn on_init(&mut self, ctx: &mut Context) -> Out;

    /// Update state every frame.
    ///
    /// Called every frame with the elapsed time `dt`. Use for animations, movement and
    /// for uploading changed uniforms.
    fn on_update(&mut self, ctx: &Context, dt: Duration) -> Out;

    /// Handle window events (keyboard, mouse, window resizing, etc.).
    fn on_window_events(&mut self, ctx: &Context, event: &WindowEvent) -> Out;

    /// Specify how to render the flow this frame.
    fn on_render(&self) -> Render<'_>;
}

impl Debug for dyn GraphicsFlow + 'static {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GraphicsFlow")
    }
}

/// Type alias for a flow constructor (factory function).
///
/// A flow constructor takes an `InitContext` and asynchronously returns a
/// boxed `GraphicsFlow`. This allows lazy initialization and resource loading.
pub type FlowConstructor =
    Box<dyn FnOnce(InitContext) -> Pin<Box<dyn Future<Output = Box<dyn GraphicsFlow>>>>>;

/// GPU context and surface status.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, settings: &Config) -> anyhow::Result<Self> {
        let ctx = Context::new(window, settings).await?;
        Ok(Self {
            ctx,
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        // A minimised window reports zero; keep the old configuration until it comes back.
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);
        }
    }

    fn render(&mut self, flows: &[Box<dyn GraphicsFlow>]) -> Result<(), wgpu::SurfaceError> {
        self.ctx.window.request_redraw();

        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sprite Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            draw_renders(
                &mut render_pass,
                &self.ctx.pipeline,
                &self.ctx.projection.bind_group,
                flows.iter().map(|flow| flow.on_render()),
            );
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    settings: Config,
    state: Option<AppState>,
    // This will hold the fully initialized flows once they are ready.
    graphics_flows: Vec<Box<dyn GraphicsFlow>>,
    // This holds the constructors at the start.
    // We use Option to `take()` it after use.
    constructors: Option<Vec<FlowConstructor>>,
    last_time: Instant,
    exit_requested: bool,
}

impl App {
    fn new(settings: Config, constructors: Vec<FlowConstructor>) -> anyhow::Result<Self> {
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            async_runtime,
            settings,
            state: None,
            graphics_flows: Vec::new(),
            constructors: Some(constructors),
            last_time: Instant::now(),
            exit_requested: false,
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Desktop platforms resume once; a second call must not rebuild the scene.
        let Some(constructors) = self.constructors.take() else {
            return;
        };

        let window_attributes = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Cannot create the window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let settings = &self.settings;
        let init_future = async move {
            let app_state = AppState::new(window, settings).await?;

            let flow_futures: Vec<_> = constructors
                .into_iter()
                // The clone in into() leverages the internal Arcs of Device and Queue and thus only clones the ref
                .map(|constructor| constructor((&app_state.ctx).into()))
                .collect();
            let flows: Vec<_> = futures::future::join_all(flow_futures).await;
            anyhow::Ok((app_state, flows))
        };

        match self.async_runtime.block_on(init_future) {
            Ok((mut app_state, flows)) => {
                self.graphics_flows = flows;
                for flow in self.graphics_flows.iter_mut() {
                    let out = flow.on_init(&mut app_state.ctx);
                    self.exit_requested |= handle_flow_output(&mut app_state.ctx, out);
                }
                self.last_time = Instant::now();
                self.state = Some(app_state);
            }
            Err(e) => {
                log::error!(
                    "App initialization failed. Cannot create the main context: {}",
                    e
                );
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        if let WindowEvent::CursorMoved { position, .. } = event {
            state.ctx.cursor = position;
        };

        for flow in self.graphics_flows.iter_mut() {
            let out = flow.on_window_events(&state.ctx, &event);
            self.exit_requested |= handle_flow_output(&mut state.ctx, out);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();

                for flow in self.graphics_flows.iter_mut() {
                    let out = flow.on_update(&state.ctx, dt);
                    self.exit_requested |= handle_flow_output(&mut state.ctx, out);
                }

                match state.render(&self.graphics_flows) {
                    Ok(_) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                        log::warn!("surface {}, reconfiguring", e);
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            _ => {}
        }

        if self.exit_requested {
            log::info!("exit requested, closing the window");
            event_loop.exit();
        }
    }
}

/// Apply a hook's output to the context. Returns whether the flow asked to exit.
fn handle_flow_output<C>(ctx: &mut C, out: Out<C>) -> bool {
    match out {
        Out::Configure(f) => {
            f(ctx);
            false
        }
        Out::Exit => true,
        Out::Empty => false,
    }
}

/// Open a window with `settings` and run the given flows until it is closed.
///
/// Flows are constructed concurrently once the GPU is ready, then initialised, updated and
/// drawn in the order given.
pub fn run(settings: Config, constructors: Vec<FlowConstructor>) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(settings, constructors)?;

    event_loop.run_app(&mut app)?;

    Ok(())
}
