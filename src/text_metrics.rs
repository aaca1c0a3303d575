use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

/// Width of `text` at `font_size` using the first installed face matching
/// `font_family`. Returns `None` when no face is available, letting the
/// caller fall back to the heuristic table.
pub fn measure_text_width(text: &str, font_size: f32, font_family: &str) -> Option<f32> {
    if font_size <= 0.0 {
        return None;
    }
    if text.is_empty() {
        return Some(0.0);
    }
    let mut guard = TEXT_MEASURER.lock().ok()?;
    guard.measure(text, font_size, font_family)
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    // family key -> extracted advances, None when the lookup failed once
    faces: HashMap<String, Option<FaceAdvances>>,
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            faces: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f32, font_family: &str) -> Option<f32> {
        let key = normalize_family_key(font_family);
        if !self.faces.contains_key(&key) {
            let loaded = self.load_advances(font_family);
            self.faces.insert(key.clone(), loaded);
        }
        let advances = self.faces.get(&key)?.as_ref()?;
        let units: f32 = text.chars().map(|ch| advances.advance(ch)).sum();
        Some(units * font_size)
    }

    fn load_advances(&mut self, font_family: &str) -> Option<FaceAdvances> {
        let families = parse_family_list(font_family);
        let mut refs: Vec<Family<'_>> = Vec::with_capacity(families.len());
        for token in &families {
            refs.push(match token {
                FamilyToken::Generic(family) => *family,
                FamilyToken::Name(name) => Family::Name(name.as_str()),
            });
        }

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let query = Query {
            families: &refs,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        self.db
            .with_face_data(id, |data, index| FaceAdvances::from_face(data, index))?
    }
}

/// Per-em advance widths extracted from a parsed face. The face data itself
/// is not retained; word cloud tokens are ASCII, so the table covers
/// everything we measure.
struct FaceAdvances {
    ascii: [f32; 128],
    fallback: f32,
}

impl FaceAdvances {
    fn from_face(data: &[u8], index: u32) -> Option<Self> {
        let face = Face::parse(data, index).ok()?;
        let units_per_em = face.units_per_em().max(1) as f32;

        let mut ascii = [0.0f32; 128];
        let mut sum = 0.0f32;
        let mut covered = 0u32;
        for byte in 32u8..127 {
            let ch = byte as char;
            if let Some(glyph) = face.glyph_index(ch) {
                if let Some(advance) = face.glyph_hor_advance(glyph) {
                    let per_em = advance as f32 / units_per_em;
                    ascii[byte as usize] = per_em;
                    sum += per_em;
                    covered += 1;
                }
            }
        }
        if covered == 0 {
            return None;
        }

        let fallback = sum / covered as f32;
        for slot in ascii.iter_mut() {
            if *slot == 0.0 {
                *slot = fallback;
            }
        }
        Some(Self { ascii, fallback })
    }

    fn advance(&self, ch: char) -> f32 {
        let code = ch as u32;
        if code < 128 {
            self.ascii[code as usize]
        } else {
            self.fallback
        }
    }
}

enum FamilyToken {
    Generic(Family<'static>),
    Name(String),
}

fn parse_family_list(font_family: &str) -> Vec<FamilyToken> {
    let mut tokens: Vec<FamilyToken> = Vec::new();
    for part in font_family.split(',') {
        let raw = part.trim().trim_matches('"').trim_matches('\'');
        if raw.is_empty() {
            continue;
        }
        let lower = raw.to_ascii_lowercase();
        match lower.as_str() {
            "serif" => tokens.push(FamilyToken::Generic(Family::Serif)),
            "sans-serif" => tokens.push(FamilyToken::Generic(Family::SansSerif)),
            "monospace" => tokens.push(FamilyToken::Generic(Family::Monospace)),
            "cursive" => tokens.push(FamilyToken::Generic(Family::Cursive)),
            "fantasy" => tokens.push(FamilyToken::Generic(Family::Fantasy)),
            "system-ui" | "-apple-system" | "ui-sans-serif" => {
                tokens.push(FamilyToken::Generic(Family::SansSerif))
            }
            "ui-monospace" => tokens.push(FamilyToken::Generic(Family::Monospace)),
            _ => tokens.push(FamilyToken::Name(raw.to_string())),
        }
    }
    if tokens.is_empty() {
        tokens.push(FamilyToken::Generic(Family::SansSerif));
    }
    tokens
}

fn normalize_family_key(font_family: &str) -> String {
    let trimmed = font_family.trim();
    if trimmed.is_empty() {
        "sans-serif".to_string()
    } else {
        trimmed.to_string()
    }
}
