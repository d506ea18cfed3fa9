// Desktop window - winit event loop presenting frames through pixels
//
// The window runs the engine: every ~16.6 ms it executes one emulated
// frame, converts the color-index buffer to RGBA, uploads it to the
// pixels surface, drains audio into the output stream, and feeds
// keyboard state back into controller port 1.
//
// Key map: Z = A, X = B, Right Shift = Select, Enter = Start, arrows =
// D-pad. F8 resets, F9 takes a screenshot, Escape quits.

use super::framebuffer::FrameBuffer;
#[cfg(feature = "audio")]
use crate::audio::AudioOutput;
use crate::emulator::{save_screenshot, Emulator, EmulatorConfig};
use crate::input::buttons;
use crate::ppu::{SCREEN_HEIGHT, SCREEN_WIDTH};
use pixels::{Pixels, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// NTSC frame period
const FRAME_DURATION: Duration = Duration::from_nanos(16_639_263);

/// Window presentation settings
#[derive(Debug, Clone, Copy)]
pub struct WindowConfig {
    /// Integer scale factor applied to the 256x240 output
    pub scale: u32,
    pub vsync: bool,
}

impl WindowConfig {
    pub fn from_config(config: &EmulatorConfig) -> Self {
        WindowConfig {
            scale: config.video.scale.clamp(1, 8),
            vsync: config.video.vsync,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            scale: 3,
            vsync: true,
        }
    }
}

/// Open a window and run the emulator until the user quits
pub fn run_window(
    emulator: Emulator,
    window_config: WindowConfig,
    app_config: EmulatorConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(emulator, window_config, app_config);
    event_loop.run_app(&mut app)?;
    Ok(())
}

struct App {
    emulator: Emulator,
    window_config: WindowConfig,
    app_config: EmulatorConfig,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    frame: FrameBuffer,
    buttons: u8,
    #[cfg(feature = "audio")]
    audio: Option<AudioOutput>,
    next_frame_at: Instant,
}

impl App {
    fn new(emulator: Emulator, window_config: WindowConfig, app_config: EmulatorConfig) -> Self {
        App {
            emulator,
            window_config,
            app_config,
            window: None,
            pixels: None,
            frame: FrameBuffer::new(),
            buttons: 0,
            #[cfg(feature = "audio")]
            audio: None,
            next_frame_at: Instant::now(),
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let pressed = event.state == ElementState::Pressed;

        let button = match code {
            KeyCode::KeyZ => buttons::A,
            KeyCode::KeyX => buttons::B,
            KeyCode::ShiftRight => buttons::SELECT,
            KeyCode::Enter => buttons::START,
            KeyCode::ArrowUp => buttons::UP,
            KeyCode::ArrowDown => buttons::DOWN,
            KeyCode::ArrowLeft => buttons::LEFT,
            KeyCode::ArrowRight => buttons::RIGHT,
            KeyCode::Escape if pressed => {
                event_loop.exit();
                return;
            }
            KeyCode::F8 if pressed => {
                self.emulator.reset();
                return;
            }
            KeyCode::F9 if pressed => {
                self.frame.update(self.emulator.bus().ppu().frame());
                match save_screenshot(self.frame.rgba(), &self.app_config.screenshot.directory) {
                    Ok(path) => println!("screenshot saved to {}", path.display()),
                    Err(err) => eprintln!("screenshot failed: {}", err),
                }
                return;
            }
            _ => return,
        };

        if pressed {
            self.buttons |= button;
        } else {
            self.buttons &= !button;
        }
        self.emulator.set_buttons(0, self.buttons);
    }

    fn run_one_frame(&mut self) {
        self.emulator.run_frame();
        self.frame.update(self.emulator.bus().ppu().frame());

        #[cfg(feature = "audio")]
        if let Some(audio) = &self.audio {
            let samples = self.emulator.audio_samples(audio.sample_rate());
            audio.push_samples(&samples);
        }
        #[cfg(not(feature = "audio"))]
        {
            // Keep the sample queue from growing without an output
            let _ = self.emulator.audio_samples(48_000);
        }
    }

    fn present(&mut self) {
        if let Some(pixels) = &mut self.pixels {
            pixels.frame_mut().copy_from_slice(self.frame.rgba());
            if let Err(err) = pixels.render() {
                eprintln!("render failed: {}", err);
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let size = LogicalSize::new(
            (SCREEN_WIDTH as u32 * self.window_config.scale) as f64,
            (SCREEN_HEIGHT as u32 * self.window_config.scale) as f64,
        );
        let attributes = Window::default_attributes()
            .with_title("famicore")
            .with_inner_size(size)
            .with_min_inner_size(LogicalSize::new(
                SCREEN_WIDTH as f64,
                SCREEN_HEIGHT as f64,
            ));

        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .expect("window creation failed"),
        );

        let physical = window.inner_size();
        let surface = SurfaceTexture::new(physical.width, physical.height, Arc::clone(&window));
        let pixels = Pixels::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32, surface)
            .expect("pixel surface creation failed");

        #[cfg(feature = "audio")]
        if self.app_config.audio.enabled {
            match AudioOutput::new(self.app_config.audio.volume) {
                Ok(audio) => self.audio = Some(audio),
                Err(err) => eprintln!("audio disabled: {}", err),
            }
        }

        self.window = Some(window);
        self.pixels = Some(pixels);
        self.next_frame_at = Instant::now();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::Resized(size) => {
                if let Some(pixels) = &mut self.pixels {
                    if pixels.resize_surface(size.width, size.height).is_err() {
                        event_loop.exit();
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.run_one_frame();
                self.present();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Fixed-rate pump at ~60 Hz
        let now = Instant::now();
        if now >= self.next_frame_at {
            self.next_frame_at = now + FRAME_DURATION;
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}
