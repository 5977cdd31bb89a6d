//! Desktop preview app for matrix-pattern-composer
//!
//! Simulates a chain of 8x8 modules in a window. Commands typed into the
//! console go through the same serial path as on hardware.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::time::Instant as StdInstant;

use eframe::egui::{self};
use matrix_pattern_composer::{
    Controller, ControllerConfig, DriverError, EngineConfig, Instant, MATRIX_HEIGHT,
    MatrixDriver, Orientation, ScrollMode,
};

/// Four chained modules
const PANEL_WIDTH: usize = 32;

/// Size of each dot in pixels
const DOT_SIZE: f32 = 14.0;

/// Gap between dots
const DOT_GAP: f32 = 3.0;

/// Responses kept in the console log
const LOG_LINES: usize = 200;

/// Quick buttons for the most common commands
const QUICK_COMMANDS: [&str; 8] = [
    "PATTERN BORED",
    "PATTERN THINKING",
    "PATTERN FINISH",
    "PATTERN REMOVE_FIGURE",
    "PATTERN ERROR",
    "PATTERN SELFTEST",
    "STOP",
    "STATUS",
];

/// In-memory panel with the same latch semantics as a MAX7219 chain
struct VirtualMatrix {
    pending: [[bool; PANEL_WIDTH]; MATRIX_HEIGHT],
    shown: [[bool; PANEL_WIDTH]; MATRIX_HEIGHT],
    intensity: u8,
}

impl VirtualMatrix {
    fn new() -> Self {
        Self {
            pending: [[false; PANEL_WIDTH]; MATRIX_HEIGHT],
            shown: [[false; PANEL_WIDTH]; MATRIX_HEIGHT],
            intensity: 0,
        }
    }
}

impl MatrixDriver for VirtualMatrix {
    fn begin(&mut self) -> Result<(), DriverError> {
        Ok(())
    }

    fn clear(&mut self) {
        self.pending = [[false; PANEL_WIDTH]; MATRIX_HEIGHT];
    }

    fn set_point(&mut self, row: usize, col: usize, on: bool) {
        if let Some(dot) = self.pending.get_mut(row).and_then(|r| r.get_mut(col)) {
            *dot = on;
        }
    }

    fn update(&mut self) {
        self.shown = self.pending;
    }

    fn set_intensity(&mut self, level: u8) {
        self.intensity = level;
    }
}

/// Serial port looped back into the UI
#[derive(Default)]
struct LoopbackPort {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

impl LoopbackPort {
    fn send_line(&mut self, line: &str) {
        self.rx.extend(line.bytes());
        self.rx.push_back(b'\n');
    }

    fn take_output(&mut self) -> String {
        String::from_utf8_lossy(&std::mem::take(&mut self.tx)).into_owned()
    }
}

impl embedded_io::ErrorType for LoopbackPort {
    type Error = Infallible;
}

impl embedded_io::Read for LoopbackPort {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let count = buf.len().min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..count)) {
            *slot = byte;
        }
        Ok(count)
    }
}

impl embedded_io::ReadReady for LoopbackPort {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.rx.is_empty())
    }
}

impl embedded_io::Write for LoopbackPort {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.tx.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 520.0])
            .with_title("Matrix Pattern Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "matrix-pattern-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    controller: Controller<VirtualMatrix, LoopbackPort, PANEL_WIDTH>,

    /// Synthetic time in milliseconds
    t_ms: u64,
    /// Wall-clock reference for delta time
    last_frame: StdInstant,
    /// Whether animation is playing
    playing: bool,
    /// Time scale multiplier (1.0 = realtime)
    time_scale: f32,
    /// Dot size for display
    dot_size: f32,
    /// Command being typed
    input: String,
    /// Everything the controller wrote back
    log: VecDeque<String>,
}

impl PreviewApp {
    fn new() -> Self {
        let config = ControllerConfig {
            engine: EngineConfig {
                finish_mode: ScrollMode::OneShot,
                orientation: Orientation::Normal,
                ..EngineConfig::default()
            },
            announce_patterns: true,
            ..ControllerConfig::default()
        };

        let mut controller =
            Controller::new(VirtualMatrix::new(), LoopbackPort::default(), &config);
        let boot = controller.boot();

        let mut app = Self {
            controller,
            t_ms: 0,
            last_frame: StdInstant::now(),
            playing: true,
            time_scale: 1.0,
            dot_size: DOT_SIZE,
            input: String::new(),
            log: VecDeque::new(),
        };
        app.collect_output();
        if let Err(error) = boot {
            app.push_log(format!("boot failed: {error}"));
        }
        app
    }

    fn send_command(&mut self, line: &str) {
        self.push_log(format!("> {line}"));
        self.controller.port_mut().send_line(line);
    }

    fn collect_output(&mut self) {
        let output = self.controller.port_mut().take_output();
        for line in output.lines() {
            self.push_log(line.to_owned());
        }
    }

    fn push_log(&mut self, line: String) {
        if self.log.len() == LOG_LINES {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }

    /// Reset time to zero
    fn reset_time(&mut self) {
        self.t_ms = 0;
        self.last_frame = StdInstant::now();
    }

    /// Update synthetic time based on wall clock and time scale
    fn update_time(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.playing {
            let delta_ms_f64 = delta.as_secs_f64() * 1000.0 * f64::from(self.time_scale);
            let delta_ms_f64 = if delta_ms_f64.is_finite() {
                #[allow(clippy::cast_precision_loss)]
                delta_ms_f64.clamp(0.0, u64::MAX as f64)
            } else {
                0.0
            };
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let delta_ms = delta_ms_f64 as u64;
            self.t_ms = self.t_ms.wrapping_add(delta_ms);
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_time();
        if self.playing {
            self.controller.poll(Instant::from_millis(self.t_ms));
        }
        self.collect_output();

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            // <PlaybackControls>
            ui.horizontal(|ui| {
                if ui.button("⏮ Reset").clicked() {
                    self.reset_time();
                }
                if ui
                    .button(if self.playing { "⏸ Pause" } else { "▶ Play" })
                    .clicked()
                {
                    self.playing = !self.playing;
                }

                ui.add_space(8.0);
                let secs = self.t_ms / 1000;
                let ms = self.t_ms % 1000;
                ui.label(format!("Time: {secs}.{ms:03}s"));

                ui.add_space(8.0);
                ui.label("Time scale:");
                ui.add(egui::Slider::new(&mut self.time_scale, 0.1..=5.0).logarithmic(true));

                ui.add_space(8.0);
                ui.label("Size:");
                ui.add(egui::Slider::new(&mut self.dot_size, 4.0..=32.0));
            });
            // </PlaybackControls>

            ui.add_space(16.0);

            // === Matrix Display ===
            let driver = self.controller.engine().driver();
            let pitch = self.dot_size + DOT_GAP;
            #[allow(clippy::cast_precision_loss)]
            let size = egui::vec2(PANEL_WIDTH as f32 * pitch, MATRIX_HEIGHT as f32 * pitch);
            let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
            let origin = response.rect.min;
            painter.rect_filled(response.rect, 4.0, egui::Color32::from_gray(16));

            // Intensity 0 is still visible on real panels
            let lit = 64 + u16::from(driver.intensity) * 12;
            #[allow(clippy::cast_possible_truncation)]
            let on_color = egui::Color32::from_rgb(lit.min(255) as u8, 24, 16);
            let off_color = egui::Color32::from_gray(40);

            #[allow(clippy::cast_precision_loss)]
            for (row, dots) in driver.shown.iter().enumerate() {
                for (col, on) in dots.iter().enumerate() {
                    let center = egui::pos2(
                        origin.x + col as f32 * pitch + pitch / 2.0,
                        origin.y + row as f32 * pitch + pitch / 2.0,
                    );
                    let color = if *on { on_color } else { off_color };
                    painter.circle_filled(center, self.dot_size / 2.0, color);
                }
            }

            ui.add_space(16.0);

            // === Console ===
            ui.horizontal_wrapped(|ui| {
                for command in QUICK_COMMANDS {
                    if ui.button(command).clicked() {
                        self.send_command(command);
                    }
                }
            });

            ui.add_space(4.0);

            ui.horizontal(|ui| {
                ui.label("Command:");
                let field = ui.text_edit_singleline(&mut self.input);
                let submitted =
                    field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if (submitted || ui.button("Send").clicked()) && !self.input.is_empty() {
                    let line = std::mem::take(&mut self.input);
                    self.send_command(&line);
                    field.request_focus();
                }
            });

            ui.add_space(4.0);

            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in &self.log {
                        ui.monospace(line);
                    }
                });
        });
    }
}
