//! ダークモード用の配色生成
//!
//! ライトモードの配色（背景・文字・アクセント）だけを作者が書き、
//! ダークモードは色相を保ったままHSL変換で導出する。
//! 不正な色文字列はエラーにせずそのまま返す。

use crate::preferences::DisplayMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HSL値
///
/// - h: 色相（0-360）
/// - s: 彩度（0-100）
/// - l: 明度（0-100）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// 配色上の役割
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    Background,
    Text,
    Accent,
}

impl ColorRole {
    pub const ALL: [ColorRole; 3] = [ColorRole::Background, ColorRole::Text, ColorRole::Accent];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorRole::Background => "background",
            ColorRole::Text => "text",
            ColorRole::Accent => "accent",
        }
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ColorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("unknown color role: {} (background/text/accent)", s))
    }
}

/// アイテムの配色（#RRGGBB × 3）
///
/// 欠けた色は空文字になり、そのまま素通りする
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Theming {
    pub background_color: String,
    pub text_color: String,
    pub accent_color: String,
}

impl Theming {
    pub fn new(
        background_color: impl Into<String>,
        text_color: impl Into<String>,
        accent_color: impl Into<String>,
    ) -> Self {
        Self {
            background_color: background_color.into(),
            text_color: text_color.into(),
            accent_color: accent_color.into(),
        }
    }

    /// ダークモード用の配色を導出
    pub fn to_dark(&self) -> Theming {
        Theming {
            background_color: to_dark_mode(&self.background_color, ColorRole::Background),
            text_color: to_dark_mode(&self.text_color, ColorRole::Text),
            accent_color: to_dark_mode(&self.accent_color, ColorRole::Accent),
        }
    }

    /// 表示モードに応じた配色
    pub fn for_mode(&self, mode: DisplayMode) -> Theming {
        match mode {
            DisplayMode::Light => self.clone(),
            DisplayMode::Dark => self.to_dark(),
        }
    }

    pub fn color(&self, role: ColorRole) -> &str {
        match role {
            ColorRole::Background => &self.background_color,
            ColorRole::Text => &self.text_color,
            ColorRole::Accent => &self.accent_color,
        }
    }
}

/// 配色が無ければ None、あればダークモード版を返す
pub fn generate_dark_theming(theming: Option<&Theming>) -> Option<Theming> {
    theming.map(Theming::to_dark)
}

/// `#RRGGBB` を [r, g, b] に分解
fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

pub fn is_hex_color(hex: &str) -> bool {
    parse_hex(hex).is_some()
}

/// #RRGGBB → HSL（各成分は整数に丸める）
pub fn hex_to_hsl(hex: &str) -> Option<Hsl> {
    let [r, g, b] = parse_hex(hex)?;
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let (h, s) = if max == min {
        // 無彩色
        (0.0, 0.0)
    } else {
        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            ((g - b) / d + if g < b { 6.0 } else { 0.0 }) / 6.0
        } else if max == g {
            ((b - r) / d + 2.0) / 6.0
        } else {
            ((r - g) / d + 4.0) / 6.0
        };
        (h, s)
    };

    Some(Hsl {
        h: (h * 360.0).round(),
        s: (s * 100.0).round(),
        l: (l * 100.0).round(),
    })
}

/// HSL → #rrggbb
pub fn hsl_to_hex(hsl: Hsl) -> String {
    let h = hsl.h.rem_euclid(360.0);
    let s = hsl.s / 100.0;
    let l = hsl.l / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let channel = |n: f64| ((n + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}

/// max(lo, min(hi, x))
fn clamp(lo: f64, hi: f64, x: f64) -> f64 {
    lo.max(hi.min(x))
}

/// ライトモードの色からダークモードの色を導出
///
/// 色相は変えず、役割ごとに明度・彩度を調整する:
/// - background: 明るい背景を暗く（明度12-25）
/// - text: 暗い文字を明るく（明度70-90）、明るい文字はそのまま
/// - accent: 暗い背景上で見える明度（45-70）と彩度（40-85）に寄せる
pub fn to_dark_mode(hex: &str, role: ColorRole) -> String {
    let Some(Hsl { h, mut s, mut l }) = hex_to_hsl(hex) else {
        return hex.to_string();
    };

    match role {
        ColorRole::Background => {
            l = clamp(12.0, 25.0, 100.0 - l * 0.85);
            s = 15.0_f64.max(s * 0.6);
        }
        ColorRole::Text => {
            if l < 50.0 {
                l = clamp(70.0, 90.0, 100.0 - l);
                s = 50.0_f64.min(s * 0.8);
            }
        }
        ColorRole::Accent => {
            l = if l > 50.0 {
                clamp(50.0, 70.0, l * 0.8)
            } else {
                clamp(45.0, 70.0, l * 1.3)
            };
            s = clamp(40.0, 85.0, s);
        }
    }

    hsl_to_hex(Hsl { h, s, l })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [&str; 12] = [
        "#FFFBEA", "#333333", "#E8A0A0", "#ff0000", "#00ff00", "#0000ff",
        "#87ceeb", "#1e3a8a", "#7c3aed", "#f5f5dc", "#2f4f4f", "#ffd700",
    ];

    fn hue_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).abs() % 360.0;
        d.min(360.0 - d)
    }

    #[test]
    fn test_hex_to_hsl() {
        assert_eq!(hex_to_hsl("#FFFBEA"), Some(Hsl { h: 49.0, s: 100.0, l: 96.0 }));
        assert_eq!(hex_to_hsl("#333333"), Some(Hsl { h: 0.0, s: 0.0, l: 20.0 }));
        assert_eq!(hex_to_hsl("#E8A0A0"), Some(Hsl { h: 0.0, s: 61.0, l: 77.0 }));
        assert_eq!(hex_to_hsl("#4b0082"), Some(Hsl { h: 275.0, s: 100.0, l: 25.0 }));
    }

    #[test]
    fn test_hex_to_hsl_rejects_malformed() {
        assert_eq!(hex_to_hsl("FFFBEA"), None);
        assert_eq!(hex_to_hsl("#FFF"), None);
        assert_eq!(hex_to_hsl("#GGGGGG"), None);
        assert_eq!(hex_to_hsl("#ＦＦＦＦＦＦ"), None);
        assert_eq!(hex_to_hsl(""), None);
    }

    #[test]
    fn test_round_trip() {
        for hex in ["#333333", "#ff0000", "#00ff00", "#0000ff", "#ffffff", "#000000", "#808080", "#fdf2f8"] {
            let hsl = hex_to_hsl(hex).expect("パース失敗");
            assert_eq!(hsl_to_hex(hsl), hex, "round trip: {}", hex);
        }
    }

    #[test]
    fn test_hsl_to_hex_wraps_hue() {
        let wrapped = hsl_to_hex(Hsl { h: 360.0, s: 100.0, l: 50.0 });
        assert_eq!(wrapped, "#ff0000");
    }

    #[test]
    fn test_to_dark_mode_known_values() {
        assert_eq!(to_dark_mode("#FFFBEA", ColorRole::Background), "#4b4113");
        assert_eq!(to_dark_mode("#333333", ColorRole::Text), "#cccccc");
        assert_eq!(to_dark_mode("#E8A0A0", ColorRole::Accent), "#d96161");
        assert_eq!(to_dark_mode("#000000", ColorRole::Text), "#e6e6e6");
        assert_eq!(to_dark_mode("#1e3a8a", ColorRole::Accent), "#2950bc");
        assert_eq!(to_dark_mode("#ffffff", ColorRole::Background), "#2c2121");
    }

    #[test]
    fn test_to_dark_mode_light_text_unchanged_in_hsl() {
        // 明るい文字は明度・彩度を変えない
        let before = hex_to_hsl("#E8A0A0").expect("パース失敗");
        let after = hex_to_hsl(&to_dark_mode("#E8A0A0", ColorRole::Text)).expect("パース失敗");
        assert_eq!(before, after);
    }

    #[test]
    fn test_to_dark_mode_always_valid_hex() {
        for hex in SAMPLES {
            for role in ColorRole::ALL {
                let dark = to_dark_mode(hex, role);
                assert!(is_hex_color(&dark), "{} {} -> {}", hex, role, dark);
                assert_eq!(dark.len(), 7);
            }
        }
    }

    #[test]
    fn test_to_dark_mode_preserves_hue() {
        // 8bitへの量子化で1度程度ずれることがある
        for hex in SAMPLES {
            let original = hex_to_hsl(hex).expect("パース失敗");
            for role in ColorRole::ALL {
                let dark = hex_to_hsl(&to_dark_mode(hex, role)).expect("パース失敗");
                assert!(
                    hue_distance(original.h, dark.h) <= 1.0,
                    "{} {}: {} -> {}",
                    hex,
                    role,
                    original.h,
                    dark.h
                );
            }
        }
    }

    #[test]
    fn test_to_dark_mode_passthrough() {
        assert_eq!(to_dark_mode("not-a-color", ColorRole::Background), "not-a-color");
        assert_eq!(to_dark_mode("#12345", ColorRole::Accent), "#12345");
        assert_eq!(to_dark_mode("", ColorRole::Text), "");
    }

    #[test]
    fn test_generate_dark_theming_none() {
        assert_eq!(generate_dark_theming(None), None);
    }

    #[test]
    fn test_generate_dark_theming_ranges() {
        let theming = Theming::new("#FFFBEA", "#333333", "#E8A0A0");
        let dark = generate_dark_theming(Some(&theming)).expect("配色が無い");

        let background = hex_to_hsl(&dark.background_color).expect("パース失敗");
        assert!((12.0..=25.0).contains(&background.l), "background l = {}", background.l);

        let text = hex_to_hsl(&dark.text_color).expect("パース失敗");
        assert!((70.0..=90.0).contains(&text.l), "text l = {}", text.l);

        assert_eq!(dark.accent_color, "#d96161");
    }

    #[test]
    fn test_for_mode() {
        let theming = Theming::new("#FFFBEA", "#333333", "#E8A0A0");
        assert_eq!(theming.for_mode(DisplayMode::Light), theming);
        assert_eq!(theming.for_mode(DisplayMode::Dark), theming.to_dark());
        assert_eq!(theming.color(ColorRole::Accent), "#E8A0A0");
    }

    #[test]
    fn test_theming_serde_camel_case() {
        let theming = Theming::new("#FFFBEA", "#333333", "#E8A0A0");
        let json = serde_json::to_string(&theming).expect("シリアライズ失敗");
        assert!(json.contains("\"backgroundColor\":\"#FFFBEA\""));
        assert!(json.contains("\"accentColor\":\"#E8A0A0\""));
    }

    #[test]
    fn test_color_role_parse() {
        assert_eq!("accent".parse::<ColorRole>(), Ok(ColorRole::Accent));
        assert!("border".parse::<ColorRole>().is_err());
    }
}
