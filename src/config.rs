//! # Room Configuration
//!
//! Every authored constant of the room lives here: camera poses, animation
//! timings, theme colors, audio levels and the social link table. The
//! [`Default`] implementation carries the values the room ships with; a JSON
//! file can override any subset of them.
//!
//! ```no_run
//! use diorama::config::RoomConfig;
//!
//! let config = RoomConfig::from_json_file("room.json").unwrap();
//! assert!(config.validate().is_ok());
//! ```

use cgmath::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f32::consts::PI;
use std::path::Path;

use crate::error::ConfigError;
use crate::gfx::camera::{CameraPose, OrbitBounds};
use crate::gfx::scene::SocialPlatform;
use crate::modal::Modal;

/// `#RRGGBB` color, stored as normalized RGB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl HexColor {
    pub fn from_rgb_u32(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as f32 / 255.0,
            g: ((rgb >> 8) & 0xff) as f32 / 255.0,
            b: (rgb & 0xff) as f32 / 255.0,
        }
    }

    pub fn to_vec(self) -> Vector3<f32> {
        Vector3::new(self.r, self.g, self.b)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ConfigError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        let digits = text.strip_prefix('#').unwrap_or(&text);
        if digits.len() != 6 {
            return Err(ConfigError::InvalidColor(text));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_rgb_u32)
            .map_err(|_| ConfigError::InvalidColor(text))
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        format!(
            "#{:02X}{:02X}{:02X}",
            channel(color.r),
            channel(color.g),
            channel(color.b)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl PoseConfig {
    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position.into(), self.target.into())
    }
}

/// Starting pose for one class of viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DevicePoseConfig {
    pub pose: PoseConfig,
    pub max_distance: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Viewports narrower than this (pixels) use the mobile pose.
    pub mobile_breakpoint: f32,
    pub desktop: DevicePoseConfig,
    pub mobile: DevicePoseConfig,
    pub min_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pub min_azimuth: f32,
    pub max_azimuth: f32,
    pub transition_duration: f32,
    pub nest_focus: PoseConfig,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl CameraConfig {
    pub fn device(&self, viewport_width: f32) -> &DevicePoseConfig {
        if viewport_width < self.mobile_breakpoint {
            &self.mobile
        } else {
            &self.desktop
        }
    }

    pub fn orbit_bounds(&self, device: &DevicePoseConfig) -> OrbitBounds {
        OrbitBounds {
            min_distance: Some(self.min_distance),
            max_distance: Some(device.max_distance),
            min_polar: self.min_polar,
            max_polar: self.max_polar,
            min_azimuth: Some(self.min_azimuth),
            max_azimuth: Some(self.max_azimuth),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        let target = [5.4624746759408973, 7.7, 1.3300979125494505];
        Self {
            fov_degrees: 35.0,
            near: 0.1,
            far: 200.0,
            mobile_breakpoint: 768.0,
            desktop: DevicePoseConfig {
                pose: PoseConfig {
                    position: [21.5, 13.0, 25.5],
                    target,
                },
                max_distance: 30.0,
            },
            mobile: DevicePoseConfig {
                pose: PoseConfig {
                    position: [35.5, 13.0, 45.5],
                    target,
                },
                max_distance: 45.0,
            },
            min_distance: 5.0,
            min_polar: 0.0,
            max_polar: PI / 2.0,
            min_azimuth: 0.0,
            max_azimuth: PI / 2.0,
            transition_duration: 1.5,
            nest_focus: PoseConfig {
                position: [5.802273883637961, 11.251038107236639, 3.96878320089606],
                target: [2.0, 8.0, -3.5884234252680836],
            },
            rotate_speed: 0.005,
            zoom_speed: 0.1,
        }
    }
}

/// Optional camera focus per modal. A modal with a focus pose opens only
/// after the camera has arrived there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalFocusConfig {
    pub about: Option<PoseConfig>,
    pub work: Option<PoseConfig>,
    pub contact: Option<PoseConfig>,
}

impl ModalFocusConfig {
    pub fn focus_for(&self, modal: Modal) -> Option<CameraPose> {
        match modal {
            Modal::About => self.about,
            Modal::Work => self.work,
            Modal::Contact => self.contact,
            Modal::LoadingCover => None,
        }
        .map(|pose| pose.pose())
    }
}

impl Default for ModalFocusConfig {
    fn default() -> Self {
        Self {
            about: Some(PoseConfig {
                position: [0.4053795360936806, 8.43632336727302, 6.323978769231198],
                target: [0.26503182728152547, 7.603102165932663, 1.3958914170966892],
            }),
            work: None,
            contact: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    pub scale_factor: f32,
    pub fish_scale_factor: f32,
    /// Radians subtracted from the about button's X rotation on hover.
    pub about_tilt: f32,
    pub enter_duration: f32,
    pub exit_duration: f32,
    pub overshoot: f32,
    pub smoke_scale: f32,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            scale_factor: 1.4,
            fish_scale_factor: 1.2,
            about_tilt: PI / 10.0,
            enter_duration: 0.5,
            exit_duration: 0.3,
            overshoot: 2.0,
            smoke_scale: 1.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub night_background: HexColor,
    pub day_background: HexColor,
    pub blend_duration: f32,
    pub feedback_rotation: f32,
    pub feedback_scale: f32,
    pub feedback_duration: f32,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            night_background: HexColor::from_rgb_u32(0x0a0a23),
            day_background: HexColor::from_rgb_u32(0xd9cad1),
            blend_duration: 1.5,
            feedback_rotation: 45.0,
            feedback_scale: 5.0,
            feedback_duration: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    pub reveal_duration: f32,
    pub reveal_delay: f32,
    /// Playback rate of the reveal timelines; `0.8` stretches them by 25%.
    pub time_scale: f32,
    /// Per-object pop duration in timeline seconds.
    pub step_duration: f32,
    pub pop_overshoot: f32,
    /// How much each book overlaps the previous one, in timeline seconds.
    pub book_overlap: f32,
    /// Extra gap per egg rank, in timeline seconds.
    pub egg_stagger: f32,
    pub egg_amplitude: f32,
    pub egg_period: f32,
    pub theme_duration: f32,
    pub theme_delay: f32,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            reveal_duration: 1.5,
            reveal_delay: 0.5,
            time_scale: 0.8,
            step_duration: 0.8,
            pop_overshoot: 1.8,
            book_overlap: 0.5,
            egg_stagger: 0.1,
            egg_amplitude: 1.0,
            egg_period: 0.4,
            theme_duration: 2.5,
            theme_delay: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub music_volume: f32,
    pub click_volume: f32,
    pub faded_volume: f32,
    pub fade_ms: u32,
    /// Duck the background music while a modal is open.
    pub fade_music_in_modals: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            music_volume: 0.5,
            click_volume: 0.5,
            faded_volume: 0.0,
            fade_ms: 500,
            fade_music_in_modals: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillationConfig {
    pub amplitude: f32,
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdleConfig {
    pub chair: OscillationConfig,
    pub accessory_first: OscillationConfig,
    pub accessory_second: OscillationConfig,
    pub flap_angle: f32,
    pub flap_speed: f32,
    pub bob_height: f32,
    /// Fan spin rate in radians per second. Fans stand still at `0`.
    pub fan_speed: f32,
    /// Height of the smoke emitter above the coffee cup.
    pub smoke_lift: f32,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            chair: OscillationConfig {
                amplitude: PI / 8.0,
                speed: 0.5,
            },
            accessory_first: OscillationConfig {
                amplitude: PI / 10.0,
                speed: 1.0,
            },
            accessory_second: OscillationConfig {
                amplitude: PI / 8.0,
                speed: 1.5,
            },
            flap_angle: PI / 2.0,
            flap_speed: 25.0,
            bob_height: 0.03,
            fan_speed: 0.0,
            smoke_lift: 0.2,
        }
    }
}

/// Complete room configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub camera: CameraConfig,
    pub modal_focus: ModalFocusConfig,
    pub hover: HoverConfig,
    pub theme: ThemeConfig,
    pub intro: IntroConfig,
    pub audio: AudioConfig,
    pub idle: IdleConfig,
    pub social_links: BTreeMap<SocialPlatform, String>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        let social_links = BTreeMap::from([
            (SocialPlatform::GitHub, "https://github.com/#".to_string()),
            (SocialPlatform::YouTube, "https://instagram.com/razornez".to_string()),
            (SocialPlatform::Twitter, "https://wa.me/6285889963822".to_string()),
        ]);
        Self {
            camera: CameraConfig::default(),
            modal_focus: ModalFocusConfig::default(),
            hover: HoverConfig::default(),
            theme: ThemeConfig::default(),
            intro: IntroConfig::default(),
            audio: AudioConfig::default(),
            idle: IdleConfig::default(),
            social_links,
        }
    }
}

impl RoomConfig {
    /// Parse and validate a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RoomConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for platform in SocialPlatform::ALL {
            let url = self
                .social_links
                .get(&platform)
                .ok_or(ConfigError::MissingLink(platform))?;
            if !is_well_formed_url(url) {
                return Err(ConfigError::MalformedLink {
                    platform,
                    url: url.clone(),
                });
            }
        }

        let durations = [
            ("camera.transition_duration", self.camera.transition_duration),
            ("hover.enter_duration", self.hover.enter_duration),
            ("hover.exit_duration", self.hover.exit_duration),
            ("theme.blend_duration", self.theme.blend_duration),
            ("theme.feedback_duration", self.theme.feedback_duration),
            ("intro.reveal_duration", self.intro.reveal_duration),
            ("intro.time_scale", self.intro.time_scale),
            ("intro.step_duration", self.intro.step_duration),
            ("intro.theme_duration", self.intro.theme_duration),
        ];
        for (field, value) in durations {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidDuration { field });
            }
        }

        let parameters = [
            ("camera.min_distance", self.camera.min_distance),
            ("intro.egg_amplitude", self.intro.egg_amplitude),
            ("intro.egg_period", self.intro.egg_period),
        ];
        for (field, value) in parameters {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidParameter { field });
            }
        }

        let camera = &self.camera;
        let bounds = [
            (
                ("camera.min_distance", camera.min_distance),
                ("camera.desktop.max_distance", camera.desktop.max_distance),
            ),
            (
                ("camera.min_distance", camera.min_distance),
                ("camera.mobile.max_distance", camera.mobile.max_distance),
            ),
            (
                ("camera.min_polar", camera.min_polar),
                ("camera.max_polar", camera.max_polar),
            ),
            (
                ("camera.min_azimuth", camera.min_azimuth),
                ("camera.max_azimuth", camera.max_azimuth),
            ),
        ];
        for ((min_field, min), (max_field, max)) in bounds {
            if !(min.is_finite() && max.is_finite() && min <= max) {
                return Err(ConfigError::InvalidBounds {
                    min_field,
                    max_field,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    pub fn social_link(&self, platform: SocialPlatform) -> Option<&str> {
        self.social_links.get(&platform).map(String::as_str)
    }
}

fn is_well_formed_url(url: &str) -> bool {
    let Some(rest) = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    else {
        return false;
    };
    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    !host.is_empty() && !url.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(RoomConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = RoomConfig::from_json_str(r#"{ "hover": { "scale_factor": 2.0 } }"#).unwrap();
        assert_eq!(config.hover.scale_factor, 2.0);
        assert_eq!(config.hover.fish_scale_factor, 1.2);
        assert_eq!(config.camera.fov_degrees, 35.0);
    }

    #[test]
    fn test_malformed_link_is_a_config_error() {
        let json = r#"{ "social_links": {
            "GitHub": "github.com/someone",
            "YouTube": "https://youtube.com",
            "Twitter": "https://twitter.com"
        } }"#;
        assert!(matches!(
            RoomConfig::from_json_str(json),
            Err(ConfigError::MalformedLink {
                platform: SocialPlatform::GitHub,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_link_is_a_config_error() {
        let mut config = RoomConfig::default();
        config.social_links.remove(&SocialPlatform::Twitter);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingLink(SocialPlatform::Twitter))
        ));
    }

    #[test]
    fn test_hex_colors() {
        let color = HexColor::try_from("#D9CAD1".to_string()).unwrap();
        assert_eq!(String::from(color), "#D9CAD1");
        assert!(HexColor::try_from("#12345".to_string()).is_err());
        assert!(RoomConfig::from_json_str(r##"{ "theme": { "day_background": "pink" } }"##).is_err());
    }

    #[test]
    fn test_viewport_selects_device_pose() {
        let camera = CameraConfig::default();
        assert_eq!(camera.device(500.0).max_distance, 45.0);
        assert_eq!(camera.device(1280.0).max_distance, 30.0);
    }

    #[test]
    fn test_zero_duration_is_rejected() {
        let mut config = RoomConfig::default();
        config.hover.exit_duration = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDuration {
                field: "hover.exit_duration"
            })
        ));
    }

    #[test]
    fn test_inverted_orbit_bounds_are_rejected() {
        let result = RoomConfig::from_json_str(r#"{ "camera": { "min_distance": 50.0 } }"#);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidBounds {
                min_field: "camera.min_distance",
                max_field: "camera.desktop.max_distance",
                ..
            })
        ));

        let mut config = RoomConfig::default();
        config.camera.min_distance = 40.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBounds {
                max_field: "camera.desktop.max_distance",
                ..
            })
        ));

        let mut config = RoomConfig::default();
        config.camera.mobile.max_distance = 4.0;
        config.camera.desktop.max_distance = 4.0;
        config.camera.min_distance = 4.5;
        assert!(config.validate().is_err());

        let mut config = RoomConfig::default();
        config.camera.min_polar = 2.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBounds {
                min_field: "camera.min_polar",
                ..
            })
        ));

        let mut config = RoomConfig::default();
        config.camera.max_azimuth = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBounds {
                min_field: "camera.min_azimuth",
                ..
            })
        ));

        let mut config = RoomConfig::default();
        config.camera.max_polar = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_degenerate_egg_elasticity_is_rejected() {
        let mut config = RoomConfig::default();
        config.intro.egg_amplitude = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter {
                field: "intro.egg_amplitude"
            })
        ));

        let mut config = RoomConfig::default();
        config.intro.egg_period = -0.4;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter {
                field: "intro.egg_period"
            })
        ));
    }
}
