use crate::scene::FireballSettings;

pub struct ControlsState {
    pub fireball: FireballSettings,

    pub vsync_enabled: bool,
    pub show_stats: bool,

    pub fps_cap_enabled: bool,
    pub fps_cap: u32,
}

impl Default for ControlsState {
    fn default() -> Self {
        Self {
            fireball: FireballSettings::default(),

            vsync_enabled: false,
            show_stats: true,

            fps_cap_enabled: false,
            fps_cap: 144,
        }
    }
}
