mod cli;
mod tracker;

use std::sync::mpsc::{Receiver, Sender};
use std::time::Instant;
use wgpu::util::DeviceExt;
use winit::keyboard::{Key, NamedKey};
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

use clap::Parser;
use zen_core::{
    extract, Camera, FrameClock, GestureState, IndicatorLabel, ParticleField, ShapeKind,
    ThemeColor, BACKGROUND_RGB, PARTICLE_COUNT, POINT_OPACITY, POINT_SIZE,
};

use crate::tracker::{LandmarkFrame, SimInput};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    color: [f32; 4],
    params: [f32; 4],
}

/// Simulation-side state driven from the window thread.
struct Scene {
    field: ParticleField,
    gesture: GestureState,
    color: ThemeColor,
    camera: Camera,
    clock: FrameClock,
    frames_rx: Receiver<LandmarkFrame>,
    sim_tx: Sender<SimInput>,
    last_label: Option<IndicatorLabel>,
    title_dirty: bool,
}

impl Scene {
    /// Fold every landmark frame that arrived since the last render.
    fn drain_gestures(&mut self) {
        while let Ok(frame) = self.frames_rx.try_recv() {
            match extract(frame.as_deref()) {
                Ok(sample) => self.gesture = self.gesture.update(&sample),
                Err(e) => log::warn!("[tracker] dropped frame: {e}"),
            }
        }
    }

    fn advance(&mut self) {
        self.drain_gestures();
        self.field.step(&self.gesture, self.clock.elapsed());
        if !self.gesture.detected {
            self.camera.orbit(Camera::auto_orbit_step());
        }
        let label = self.gesture.indicator().label;
        if self.last_label != Some(label) {
            self.last_label = Some(label);
            self.title_dirty = true;
        }
    }

    fn select_shape(&mut self, shape: ShapeKind) {
        if self.field.set_shape(shape) {
            log::info!("[shape] {}", shape);
            self.title_dirty = true;
        }
    }

    fn title(&self) -> String {
        let indicator = self.gesture.indicator();
        let filled = (indicator.fill * 10.0).round() as usize;
        format!(
            "Zen Particles | {} | {} | {} [{}{}]",
            self.field.shape(),
            self.color.name,
            indicator.label.as_str(),
            "#".repeat(filled),
            "-".repeat(10 - filled.min(10)),
        )
    }

    fn handle_key(&mut self, key: &Key) -> bool {
        match key {
            Key::Character(c) => match c.as_str() {
                "1" => self.select_shape(ShapeKind::Heart),
                "2" => self.select_shape(ShapeKind::Flower),
                "3" => self.select_shape(ShapeKind::Saturn),
                "4" => self.select_shape(ShapeKind::MeditatingFigure),
                "5" => self.select_shape(ShapeKind::Fireworks),
                "6" => self.select_shape(ShapeKind::Sphere),
                "c" | "C" => {
                    self.color = self.color.next();
                    self.title_dirty = true;
                }
                "h" | "H" => {
                    let _ = self.sim_tx.send(SimInput::ToggleVisible);
                }
                "q" | "Q" => return false,
                _ => {}
            },
            Key::Named(NamedKey::Space) => self.select_shape(self.field.shape().next()),
            Key::Named(NamedKey::Escape) => return false,
            _ => {}
        }
        true
    }
}

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    instance_count: u32,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window, instance_count: usize) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particles"),
            source: wgpu::ShaderSource::Wgsl(zen_core::PARTICLES_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        // Sprite corners for two triangles
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        // particle count is fixed for the session, so the buffer is never resized
        let instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particle_positions"),
            size: (std::mem::size_of::<[f32; 3]>() * instance_count) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_buffers = [
            // slot 0: sprite corners
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: one position per particle
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 1,
                }],
            },
        ];
        let additive = wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        };
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState {
                        color: additive,
                        alpha: additive,
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            quad_vb,
            instance_vb,
            instance_count: instance_count as u32,
            bind_group,
            width: size.width.max(1),
            height: size.height.max(1),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    fn render(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let rgb = scene.color.rgb();
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view: scene.camera.view_matrix().to_cols_array_2d(),
                proj: scene.camera.projection_matrix().to_cols_array_2d(),
                model: scene.field.pose().model_matrix().to_cols_array_2d(),
                color: [rgb[0], rgb[1], rgb[2], 1.0],
                params: [POINT_SIZE, POINT_OPACITY, 0.0, 0.0],
            }),
        );
        self.queue.write_buffer(
            &self.instance_vb,
            0,
            bytemuck::cast_slice(scene.field.positions_flat()),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: BACKGROUND_RGB[0] as f64,
                            g: BACKGROUND_RGB[1] as f64,
                            b: BACKGROUND_RGB[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
            rpass.draw(0..6, 0..self.instance_count);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = cli::Args::parse();
    log::info!(
        "starting with shape {} and color {} ({} particles)",
        args.shape,
        args.color.name,
        PARTICLE_COUNT
    );

    let (sim_tx, frames_rx) = tracker::spawn_hand_simulator(args.tracker_hz, !args.hidden_hand)?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Zen Particles")
        .with_inner_size(winit::dpi::LogicalSize::new(args.width, args.height))
        .build(&event_loop)?;

    let started = Instant::now();
    let field = ParticleField::new(args.shape);
    log::info!("generated {} in {:?}", args.shape, started.elapsed());

    let mut state = pollster::block_on(GpuState::new(&window, field.len()))?;
    let mut scene = Scene {
        field,
        gesture: GestureState::default(),
        color: args.color,
        camera: Camera::new(state.aspect()),
        clock: FrameClock::new(),
        frames_rx,
        sim_tx,
        last_label: None,
        title_dirty: true,
    };

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => {
            state.resize(size);
            scene.camera.aspect = state.aspect();
        }
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key,
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                },
            ..
        } => {
            if !scene.handle_key(&logical_key) {
                elwt.exit();
            }
        }
        Event::WindowEvent {
            event: WindowEvent::CursorMoved { position, .. },
            ..
        } => {
            let x = position.x as f32 / state.width as f32;
            let y = position.y as f32 / state.height as f32;
            let _ = scene.sim_tx.send(SimInput::Pointer { x, y });
        }
        Event::AboutToWait => {
            scene.advance();
            if scene.title_dirty {
                state.window.set_title(&scene.title());
                scene.title_dirty = false;
            }
            match state.render(&scene) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::warn!("surface error: {e:?}"),
            }
        }
        _ => {}
    })?;
    Ok(())
}
