//! Chart colors per theme.

use super::Theme;

const LINE_COLOR: &str = "rgba(75, 192, 192, 1)";
const FILL_COLOR: &str = "rgba(75, 192, 192, 0.2)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: &'static str,
    pub grid: &'static str,
    pub line: &'static str,
    pub fill: &'static str,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                text: "#ffffff",
                grid: "rgba(255, 255, 255, 0.1)",
                line: LINE_COLOR,
                fill: FILL_COLOR,
            },
            Theme::Light => Self {
                text: "#000000",
                grid: "rgba(0, 0, 0, 0.1)",
                line: LINE_COLOR,
                fill: FILL_COLOR,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_follows_theme() {
        let dark = Palette::for_theme(Theme::Dark);
        assert_eq!(dark.text, "#ffffff");
        assert_eq!(dark.grid, "rgba(255, 255, 255, 0.1)");

        let light = Palette::for_theme(Theme::Light);
        assert_eq!(light.text, "#000000");
        assert_eq!(light.line, dark.line);
        assert_eq!(light.fill, "rgba(75, 192, 192, 0.2)");
    }
}
