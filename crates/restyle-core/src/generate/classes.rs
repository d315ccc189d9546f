//! Utility-class generation.
//!
//! Groups are emitted in a fixed order: padding, margin, size, typography,
//! transforms, 3D transforms, opacity, background, border, effects, position.
//! Fields holding their baseline contribute nothing, except font size, weight
//! and line height which are always emitted. The user's own `tailwindClasses`
//! follow, unprefixed, filtered through [`is_valid_class_token`].

use crate::breakpoint::Breakpoint;
use crate::format::{arbitrary, fmt_num, is_zero_width, length, plain};
use crate::sanitize::is_valid_class_token;
use crate::state::{PositionKind, Shadow, StyleState, TextAlign};

/// Generates the utility-class string for `state` at `breakpoint`.
///
/// For any breakpoint other than `auto`/`base`, every generated token is
/// prefixed with `"<breakpoint>:"`.
pub fn generate_classes(state: &StyleState, breakpoint: Breakpoint) -> String {
    let mut tokens = Tokens::new(breakpoint.prefix());

    padding(state, &mut tokens);
    margin(state, &mut tokens);
    size(state, &mut tokens);
    typography(state, &mut tokens);
    transforms(state, &mut tokens);
    transforms_3d(state, &mut tokens);
    opacity(state, &mut tokens);
    background(state, &mut tokens);
    border(state, &mut tokens);
    effects(state, &mut tokens);
    position(state, &mut tokens);

    let mut out = tokens.items;
    for token in state.tailwind_classes.split_whitespace() {
        if is_valid_class_token(token) && !out.iter().any(|t| t == token) {
            out.push(token.to_string());
        }
    }
    out.join(" ")
}

struct Tokens {
    prefix: Option<&'static str>,
    items: Vec<String>,
}

impl Tokens {
    fn new(prefix: Option<&'static str>) -> Self {
        Self {
            prefix,
            items: Vec::new(),
        }
    }

    fn push(&mut self, token: impl AsRef<str>) {
        let token = token.as_ref();
        match self.prefix {
            Some(prefix) => self.items.push(format!("{}:{}", prefix, token)),
            None => self.items.push(token.to_string()),
        }
    }

    /// Pushes `utility-[value]` when the value survives token encoding.
    fn bracket(&mut self, utility: &str, value: Option<String>) {
        if let Some(v) = value.as_deref().and_then(arbitrary) {
            self.push(format!("{}-[{}]", utility, v));
        }
    }
}

fn padding(state: &StyleState, tokens: &mut Tokens) {
    let p = &state.padding;
    tokens.bracket("pt", length(&p.top));
    tokens.bracket("pr", length(&p.right));
    tokens.bracket("pb", length(&p.bottom));
    tokens.bracket("pl", length(&p.left));
}

fn margin(state: &StyleState, tokens: &mut Tokens) {
    tokens.bracket("mx", length(&state.margin.x));
    tokens.bracket("my", length(&state.margin.y));
}

fn size(state: &StyleState, tokens: &mut Tokens) {
    let s = &state.size;
    tokens.bracket("w", length(&s.width));
    tokens.bracket("h", length(&s.height));
    tokens.bracket("max-w", length(&s.max_width));
    tokens.bracket("max-h", length(&s.max_height));
    tokens.bracket("min-w", length(&s.min_width));
    tokens.bracket("min-h", length(&s.min_height));
}

fn typography(state: &StyleState, tokens: &mut Tokens) {
    let t = &state.typography;

    match t.font_family.trim() {
        "" | "sans" => {}
        "serif" => tokens.push("font-serif"),
        "mono" => tokens.push("font-mono"),
        family => tokens.bracket("font", Some(family.to_string())),
    }
    tokens.bracket("text", length(&t.font_size));
    tokens.bracket("font", plain(&t.font_weight));
    tokens.bracket("leading", plain(&t.line_height));
    tokens.bracket("tracking", length(&t.letter_spacing));
    if t.text_align != TextAlign::Left {
        tokens.push(format!("text-{}", t.text_align.as_str()));
    }
    tokens.bracket("text", plain(&t.text_color));
}

fn transforms(state: &StyleState, tokens: &mut Tokens) {
    let t = &state.transforms;
    if t.translate_x != 0.0 {
        tokens.push(format!("translate-x-[{}px]", fmt_num(t.translate_x)));
    }
    if t.translate_y != 0.0 {
        tokens.push(format!("translate-y-[{}px]", fmt_num(t.translate_y)));
    }
    if t.rotate != 0.0 {
        tokens.push(format!("rotate-[{}deg]", fmt_num(t.rotate)));
    }
    if t.scale != 100.0 {
        tokens.push(format!("scale-[{}]", fmt_num(t.scale / 100.0)));
    }
    if t.skew_x != 0.0 {
        tokens.push(format!("skew-x-[{}deg]", fmt_num(t.skew_x)));
    }
    if t.skew_y != 0.0 {
        tokens.push(format!("skew-y-[{}deg]", fmt_num(t.skew_y)));
    }
}

fn transforms_3d(state: &StyleState, tokens: &mut Tokens) {
    let t = &state.transforms_3d;
    for (function, value) in [
        ("rotateX", t.rotate_x),
        ("rotateY", t.rotate_y),
        ("rotateZ", t.rotate_z),
    ] {
        if value != 0.0 {
            tokens.push(format!("[transform:{}({}deg)]", function, fmt_num(value)));
        }
    }
    if t.perspective != 0.0 {
        tokens.push(format!("[perspective:{}px]", fmt_num(t.perspective * 100.0)));
    }
}

fn opacity(state: &StyleState, tokens: &mut Tokens) {
    let opacity = state.effects.opacity;
    if opacity != 100.0 {
        tokens.push(format!("opacity-[{}]", fmt_num(opacity / 100.0)));
    }
}

fn background(state: &StyleState, tokens: &mut Tokens) {
    tokens.bracket("bg", state.appearance.background_color.to_css());
}

fn border(state: &StyleState, tokens: &mut Tokens) {
    let b = &state.border;
    if b.radius.all > 0.0 {
        tokens.push(format!("rounded-[{}px]", fmt_num(b.radius.all)));
    }
    if !is_zero_width(&b.width) {
        tokens.bracket("border", length(&b.width));
        tokens.push(format!("border-{}", b.style.as_str()));
        tokens.bracket("border", plain(&b.color));
    }
    tokens.bracket("ring", plain(&b.ring_color));
}

fn effects(state: &StyleState, tokens: &mut Tokens) {
    let fx = &state.effects;
    if fx.shadow != Shadow::None {
        tokens.push(format!("shadow-{}", fx.shadow.as_str()));
    }
    if fx.blur != 0.0 {
        tokens.push(format!("blur-[{}px]", fmt_num(fx.blur)));
    }
    if fx.backdrop_blur != 0.0 {
        tokens.push(format!("backdrop-blur-[{}px]", fmt_num(fx.backdrop_blur)));
    }
    for (utility, value) in [
        ("brightness", fx.brightness),
        ("contrast", fx.contrast),
        ("saturate", fx.saturation),
    ] {
        if value != 100.0 {
            tokens.push(format!("{}-[{}]", utility, fmt_num(value / 100.0)));
        }
    }
    if fx.hue_rotate != 0.0 {
        tokens.push(format!("hue-rotate-[{}deg]", fmt_num(fx.hue_rotate)));
    }
    for (utility, value) in [
        ("grayscale", fx.grayscale),
        ("invert", fx.invert),
        ("sepia", fx.sepia),
    ] {
        if value != 0.0 {
            tokens.push(format!("{}-[{}]", utility, fmt_num(value / 100.0)));
        }
    }
}

fn position(state: &StyleState, tokens: &mut Tokens) {
    let p = &state.position;
    if p.kind == PositionKind::Static {
        return;
    }
    tokens.push(p.kind.as_str());
    tokens.bracket("left", length(&p.l));
    tokens.bracket("top", length(&p.t));
    tokens.bracket("right", length(&p.r));
    tokens.bracket("bottom", length(&p.b));
    tokens.bracket("z", plain(&p.z_index));
}
