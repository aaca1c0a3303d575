use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub background: String,
    pub word_colors: Vec<String>,
}

impl Theme {
    /// Light background with the classic category palette most word cloud
    /// renderers ship with.
    pub fn classic() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            background: "#FFFFFF".to_string(),
            word_colors: vec![
                "#1F77B4".to_string(),
                "#FF7F0E".to_string(),
                "#2CA02C".to_string(),
                "#D62728".to_string(),
                "#9467BD".to_string(),
                "#8C564B".to_string(),
                "#E377C2".to_string(),
                "#7F7F7F".to_string(),
                "#BCBD22".to_string(),
                "#17BECF".to_string(),
            ],
        }
    }

    /// Dark slate background with a muted pastel palette.
    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            background: "#1C2430".to_string(),
            word_colors: vec![
                "#8FB8E8".to_string(),
                "#F2B880".to_string(),
                "#9FD8A0".to_string(),
                "#E89A9A".to_string(),
                "#C9B3E6".to_string(),
                "#D8C49A".to_string(),
                "#EFB9D8".to_string(),
                "#B8C4D0".to_string(),
            ],
        }
    }

    /// Palette color for the placed word at `index`, cycling when the
    /// palette is shorter than the layout.
    pub fn color_for(&self, index: usize) -> &str {
        if self.word_colors.is_empty() {
            return "#333333";
        }
        &self.word_colors[index % self.word_colors.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles_past_its_length() {
        let theme = Theme::classic();
        let n = theme.word_colors.len();
        assert_eq!(theme.color_for(0), theme.color_for(n));
        assert_eq!(theme.color_for(3), theme.word_colors[3].as_str());
    }

    #[test]
    fn empty_palette_falls_back_to_a_color() {
        let theme = Theme {
            word_colors: Vec::new(),
            ..Theme::classic()
        };
        assert!(theme.color_for(7).starts_with('#'));
    }
}
