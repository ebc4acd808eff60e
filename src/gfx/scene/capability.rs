//! Name-derived capability tags.
//!
//! Object names coming out of the modelling tool carry their role as
//! substrings (`About_Button_Hover_Raycaster_Pointer`, `Egg_3`, ...). The
//! names are scanned exactly once, at registration, and folded into a
//! [`Capabilities`] value. Nothing downstream looks at names again except the
//! egg ordering, which reads the numeric suffix.

use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

/// Bitmask of boolean capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CapabilityFlags(u32);

impl CapabilityFlags {
    pub const NONE: Self = Self(0);
    pub const RAYCAST: Self = Self(1 << 0);
    pub const HOVER: Self = Self(1 << 1);
    pub const POINTER: Self = Self(1 << 2);
    pub const BUTTON: Self = Self(1 << 3);
    pub const ABOUT_BUTTON: Self = Self(1 << 4);
    pub const WORK_BUTTON: Self = Self(1 << 5);
    pub const CONTACT_BUTTON: Self = Self(1 << 6);
    /// Rotation returns to baseline on hover exit.
    pub const ROTATION_RESET: Self = Self(1 << 7);
    /// Position Y returns to baseline on hover exit.
    pub const NAME_LETTER: Self = Self(1 << 8);
    pub const FISH: Self = Self(1 << 9);
    pub const COFFEE: Self = Self(1 << 10);
    pub const BOOK: Self = Self(1 << 11);
    pub const EGG: Self = Self(1 << 12);
    pub const CACTUS: Self = Self(1 << 13);
    pub const SCREEN: Self = Self(1 << 14);
    pub const CHAIR_TOP: Self = Self(1 << 15);
    pub const BIRD_BODY: Self = Self(1 << 16);
    pub const BIRD_WING_LEFT: Self = Self(1 << 17);
    pub const BIRD_WING_RIGHT: Self = Self(1 << 18);
    pub const ACCESSORY: Self = Self(1 << 19);
    pub const FAN_X: Self = Self(1 << 20);
    pub const FAN_Y: Self = Self(1 << 21);
    pub const NEST: Self = Self(1 << 22);
    pub const LOOK_AWAY: Self = Self(1 << 23);
    pub const THEMED: Self = Self(1 << 24);
    pub const SOCIAL_GITHUB: Self = Self(1 << 25);
    pub const SOCIAL_YOUTUBE: Self = Self(1 << 26);
    pub const SOCIAL_TWITTER: Self = Self(1 << 27);

    /// Objects whose scale starts at zero and is revealed by the intro.
    pub const REVEALED: Self = Self(Self::BOOK.0 | Self::EGG.0 | Self::CACTUS.0);

    pub fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for CapabilityFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CapabilityFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs);
    }
}

/// The four baked texture sets that carry a day and a night variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TextureSet {
    First,
    Second,
    Third,
    Fourth,
}

impl TextureSet {
    pub const ALL: [TextureSet; 4] = [
        TextureSet::First,
        TextureSet::Second,
        TextureSet::Third,
        TextureSet::Fourth,
    ];

    pub fn pattern(self) -> &'static str {
        match self {
            TextureSet::First => "First",
            TextureSet::Second => "Second",
            TextureSet::Third => "Third",
            TextureSet::Fourth => "Fourth",
        }
    }

    /// 1-based index the theme shader uses to pick the texture pair.
    pub fn shader_index(self) -> u32 {
        match self {
            TextureSet::First => 1,
            TextureSet::Second => 2,
            TextureSet::Third => 3,
            TextureSet::Fourth => 4,
        }
    }
}

/// Social platforms that open an external link when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SocialPlatform {
    GitHub,
    YouTube,
    Twitter,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 3] = [
        SocialPlatform::GitHub,
        SocialPlatform::YouTube,
        SocialPlatform::Twitter,
    ];

    pub fn pattern(self) -> &'static str {
        match self {
            SocialPlatform::GitHub => "GitHub",
            SocialPlatform::YouTube => "YouTube",
            SocialPlatform::Twitter => "Twitter",
        }
    }

    pub fn flag(self) -> CapabilityFlags {
        match self {
            SocialPlatform::GitHub => CapabilityFlags::SOCIAL_GITHUB,
            SocialPlatform::YouTube => CapabilityFlags::SOCIAL_YOUTUBE,
            SocialPlatform::Twitter => CapabilityFlags::SOCIAL_TWITTER,
        }
    }
}

/// Which idle oscillation profile an accessory follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessoryOscillator {
    First,
    Second,
}

/// Everything the engine knows about an object's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub flags: CapabilityFlags,
    pub texture_set: Option<TextureSet>,
    pub oscillator: Option<AccessoryOscillator>,
}

impl Capabilities {
    pub fn has(&self, flag: CapabilityFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Social platforms tagged on this object, in table order.
    pub fn social_platforms(&self) -> impl Iterator<Item = SocialPlatform> + '_ {
        SocialPlatform::ALL
            .into_iter()
            .filter(|platform| self.flags.contains(platform.flag()))
    }
}

enum Match {
    Contains(&'static str),
    Exact(&'static str),
}

impl Match {
    fn test(&self, name: &str) -> bool {
        match self {
            Match::Contains(pattern) => name.contains(pattern),
            Match::Exact(pattern) => name == *pattern,
        }
    }
}

const RULES: &[(Match, CapabilityFlags)] = &[
    (Match::Contains("Chair_Top"), CapabilityFlags::CHAIR_TOP),
    (Match::Exact("Bird_1_Fourth_Raycaster"), CapabilityFlags::BIRD_BODY),
    (Match::Contains("Birdwing_1"), CapabilityFlags::BIRD_WING_LEFT),
    (Match::Contains("Birdwing_2"), CapabilityFlags::BIRD_WING_RIGHT),
    (Match::Exact("Acc_Fourth_1"), CapabilityFlags::ACCESSORY),
    (Match::Exact("Acc_Fourth_2"), CapabilityFlags::ACCESSORY),
    (Match::Contains("Coffee"), CapabilityFlags::COFFEE),
    (Match::Contains("Raycaster"), CapabilityFlags::RAYCAST),
    (Match::Contains("Hover"), CapabilityFlags::HOVER),
    (Match::Contains("Pointer"), CapabilityFlags::POINTER),
    (Match::Contains("Book_"), CapabilityFlags::BOOK),
    (Match::Contains("Egg_"), CapabilityFlags::EGG),
    (Match::Contains("Cactus"), CapabilityFlags::CACTUS),
    (Match::Contains("Screen"), CapabilityFlags::SCREEN),
    (Match::Contains("Fish"), CapabilityFlags::FISH),
    (Match::Contains("Button"), CapabilityFlags::BUTTON),
    (
        Match::Contains("About_Button"),
        CapabilityFlags(CapabilityFlags::ABOUT_BUTTON.0 | CapabilityFlags::ROTATION_RESET.0),
    ),
    (Match::Contains("Work_Button"), CapabilityFlags::WORK_BUTTON),
    (Match::Contains("My_Work_Button"), CapabilityFlags::ROTATION_RESET),
    (
        Match::Contains("Contact_Button"),
        CapabilityFlags(CapabilityFlags::CONTACT_BUTTON.0 | CapabilityFlags::ROTATION_RESET.0),
    ),
    (Match::Contains("Name_Letter"), CapabilityFlags::NAME_LETTER),
    (Match::Contains("Nest_Fourth_Raycaster"), CapabilityFlags::NEST),
    (Match::Exact("Bird_2_Fourth_Raycaster_Hover"), CapabilityFlags::LOOK_AWAY),
    (Match::Exact("Bird_3_Fourth_Raycaster_Hover"), CapabilityFlags::LOOK_AWAY),
    (Match::Exact("Bird_4_Fourth_Raycaster_Hover"), CapabilityFlags::LOOK_AWAY),
];

/// Derive the capabilities of an object from its name.
///
/// Flags accumulate independently. The texture set is the one exception:
/// when a name mentions several sets, the last set in [`TextureSet::ALL`]
/// wins. Fans are only recognised on themed objects; `Fan_2` and `Fan_4`
/// spin around X, every other fan around Y.
pub fn classify(name: &str) -> Capabilities {
    let mut caps = Capabilities::default();

    for (rule, flags) in RULES {
        if rule.test(name) {
            caps.flags |= *flags;
        }
    }

    if name == "Acc_Fourth_1" {
        caps.oscillator = Some(AccessoryOscillator::First);
    } else if name == "Acc_Fourth_2" {
        caps.oscillator = Some(AccessoryOscillator::Second);
    }

    for platform in SocialPlatform::ALL {
        if name.contains(platform.pattern()) {
            caps.flags |= platform.flag() | CapabilityFlags::ROTATION_RESET;
        }
    }

    for set in TextureSet::ALL {
        if !name.contains(set.pattern()) {
            continue;
        }
        caps.texture_set = Some(set);
        caps.flags |= CapabilityFlags::THEMED;
        if name.contains("Fan") {
            if name.contains("Fan_2") || name.contains("Fan_4") {
                caps.flags |= CapabilityFlags::FAN_X;
            } else {
                caps.flags |= CapabilityFlags::FAN_Y;
            }
        }
    }

    caps
}

/// First run of ASCII digits in `name`, parsed as an integer.
pub fn numeric_suffix(name: &str) -> Option<u32> {
    let start = name.find(|c: char| c.is_ascii_digit())?;
    let digits: String = name[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_about_button_tags() {
        let caps = classify("About_Button_Fourth_Raycaster_Hover_Pointer");
        assert!(caps.has(CapabilityFlags::ABOUT_BUTTON));
        assert!(caps.has(CapabilityFlags::BUTTON));
        assert!(caps.has(CapabilityFlags::HOVER));
        assert!(caps.has(CapabilityFlags::RAYCAST));
        assert!(caps.has(CapabilityFlags::POINTER));
        assert!(caps.has(CapabilityFlags::ROTATION_RESET));
        assert_eq!(caps.texture_set, Some(TextureSet::Fourth));
        assert!(!caps.has(CapabilityFlags::WORK_BUTTON));
    }

    #[test]
    fn test_my_work_button_is_a_work_button() {
        let caps = classify("My_Work_Button_Third_Raycaster_Hover");
        assert!(caps.has(CapabilityFlags::WORK_BUTTON));
        assert!(caps.has(CapabilityFlags::ROTATION_RESET));
    }

    #[test]
    fn test_themed_fan_axes() {
        let x = classify("Fan_2_Second");
        assert!(x.has(CapabilityFlags::FAN_X));
        assert!(!x.has(CapabilityFlags::FAN_Y));
        let y = classify("Fan_1_Second");
        assert!(y.has(CapabilityFlags::FAN_Y));
        let unthemed = classify("Fan_2");
        assert!(!unthemed.has(CapabilityFlags::FAN_X));
        assert!(unthemed.texture_set.is_none());
    }

    #[test]
    fn test_last_texture_set_wins() {
        let caps = classify("First_Shelf_Third");
        assert_eq!(caps.texture_set, Some(TextureSet::Third));
    }

    #[test]
    fn test_exact_matches_do_not_leak() {
        assert!(classify("Bird_1_Fourth_Raycaster").has(CapabilityFlags::BIRD_BODY));
        assert!(!classify("Bird_1_Fourth_Raycaster_Hover").has(CapabilityFlags::BIRD_BODY));
        assert_eq!(
            classify("Acc_Fourth_2").oscillator,
            Some(AccessoryOscillator::Second)
        );
        assert!(classify("Acc_Fourth_10").oscillator.is_none());
    }

    #[test]
    fn test_social_platforms() {
        let caps = classify("GitHub_Fourth_Raycaster_Hover_Pointer");
        let platforms: Vec<_> = caps.social_platforms().collect();
        assert_eq!(platforms, vec![SocialPlatform::GitHub]);
    }

    #[test]
    fn test_numeric_suffix() {
        assert_eq!(numeric_suffix("Egg_12_Fourth"), Some(12));
        assert_eq!(numeric_suffix("Egg_"), None);
    }
}
