use egui::Color32;

use crate::timer::AlertSink;

/// Background tint while the countdown alert is active
pub const FLASH_FILL: Color32 = Color32::from_rgb(0xFF, 0xCC, 0xCC);

/// Alert effects for the running application: a beep and a page tint
#[derive(Debug)]
pub struct PageAlerts {
    ctx: egui::Context,
    flash: bool,
}

impl PageAlerts {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx, flash: false }
    }

    /// Panel fill to use this frame, if the tint is on
    pub fn flash_fill(&self) -> Option<Color32> {
        self.flash.then_some(FLASH_FILL)
    }
}

impl AlertSink for PageAlerts {
    fn beep(&mut self) {
        #[cfg(target_arch = "wasm32")]
        if let Err(err) = play_beep() {
            log::warn!("Failed to play alert sound: {:?}", err);
        }

        #[cfg(not(target_arch = "wasm32"))]
        self.ctx.send_viewport_cmd(egui::ViewportCommand::RequestUserAttention(
            egui::UserAttentionType::Informational,
        ));

        self.ctx.request_repaint();
    }

    fn set_flash(&mut self, on: bool) {
        self.flash = on;
        self.ctx.request_repaint();
    }
}

/// 800 Hz sine decaying over half a second
#[cfg(target_arch = "wasm32")]
fn play_beep() -> Result<(), wasm_bindgen::JsValue> {
    let audio = web_sys::AudioContext::new()?;
    let oscillator = audio.create_oscillator()?;
    let gain = audio.create_gain()?;

    oscillator.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&audio.destination())?;

    oscillator.set_type(web_sys::OscillatorType::Sine);
    oscillator.frequency().set_value(800.0);

    let now = audio.current_time();
    gain.gain().set_value_at_time(0.3, now)?;
    gain.gain().exponential_ramp_to_value_at_time(0.01, now + 0.5)?;

    oscillator.start_with_when(now)?;
    oscillator.stop_with_when(now + 0.5)?;
    Ok(())
}
