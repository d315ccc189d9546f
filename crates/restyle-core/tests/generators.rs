//! End-to-end generator scenarios.

use insta::assert_snapshot;
use restyle_core::{
    generate_classes, generate_markup, generate_styles, patch, Breakpoint, BorderStyle, Gradient,
    GradientStop, PositionKind, Shadow, StyleState, Tag, TextAlign,
};
use serde_json::json;

fn card() -> StyleState {
    let mut s = StyleState::default();
    s.tag = Tag::Section;
    s.element_id = "card".into();
    s.text_content = "Welcome".into();
    s.padding.top = "24".into();
    s.padding.bottom = "24".into();
    s.margin.x = "auto".into();
    s.size.max_width = "640".into();
    s.typography.font_family = "serif".into();
    s.typography.font_size = "20".into();
    s.typography.font_weight = "600".into();
    s.typography.text_align = TextAlign::Center;
    s.typography.text_color = "#111827".into();
    s.appearance.background_color = Gradient::linear(
        135.0,
        vec![
            GradientStop::new("#f0abfc", 0.0),
            GradientStop::new("#818cf8", 100.0),
        ],
    )
    .unwrap()
    .into();
    s.border.width = "1".into();
    s.border.color = "#e5e7eb".into();
    s.border.style = BorderStyle::Solid;
    s.border.radius.all = 16.0;
    s.effects.shadow = Shadow::Lg;
    s.transforms.rotate = -2.0;
    s.position.kind = PositionKind::Relative;
    s
}

#[test]
fn card_classes_at_base() {
    assert_snapshot!(
        generate_classes(&card(), Breakpoint::Auto),
        @"pt-[24px] pb-[24px] max-w-[640px] font-serif text-[20px] font-[600] leading-[1.5] text-center text-[#111827] rotate-[-2deg] bg-[linear-gradient(135deg,#f0abfc_0%,#818cf8_100%)] rounded-[16px] border-[1px] border-solid border-[#e5e7eb] shadow-lg relative"
    );
}

#[test]
fn card_classes_at_sm() {
    let mut state = card();
    state.tailwind_classes = "flex items-center".into();
    assert_snapshot!(
        generate_classes(&state, Breakpoint::Sm),
        @"sm:pt-[24px] sm:pb-[24px] sm:max-w-[640px] sm:font-serif sm:text-[20px] sm:font-[600] sm:leading-[1.5] sm:text-center sm:text-[#111827] sm:rotate-[-2deg] sm:bg-[linear-gradient(135deg,#f0abfc_0%,#818cf8_100%)] sm:rounded-[16px] sm:border-[1px] sm:border-solid sm:border-[#e5e7eb] sm:shadow-lg sm:relative flex items-center"
    );
}

#[test]
fn card_inline_styles() {
    assert_snapshot!(
        generate_styles(&card()).to_css(),
        @"background-color: transparent; background-image: linear-gradient(135deg, #f0abfc 0%, #818cf8 100%); color: #111827; font-family: ui-serif, Georgia, serif; font-size: 20px; font-weight: 600; line-height: 1.5; text-align: center; border: 1px solid #e5e7eb; border-radius: 16px; transform: rotate(-2deg); box-shadow: 0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1); padding: 24px 0 24px 0; max-width: 640px; position: relative"
    );
}

#[test]
fn card_markup() {
    let state = card();
    let classes = generate_classes(&state, Breakpoint::Auto);
    let markup = generate_markup(&state, &classes);
    assert!(markup.starts_with("<section id=\"card\" class=\"pt-[24px] "));
    assert!(markup.ends_with("relative\">Welcome</section>"));
}

#[test]
fn opacity_scenario() {
    let mut state = StyleState::default();
    state.effects.opacity = 50.0;
    assert_eq!(generate_styles(&state).get("opacity"), Some("0.5"));
}

#[test]
fn translate_only_scenario() {
    let mut state = StyleState::default();
    state.transforms.translate_x = 10.0;
    state.transforms.translate_y = 0.0;
    state.transforms.rotate = 0.0;
    state.transforms.scale = 100.0;
    state.transforms.skew_x = 0.0;
    state.transforms.skew_y = 0.0;
    assert_eq!(generate_styles(&state).get("transform"), Some("translateX(10px)"));
}

#[test]
fn border_shorthand_scenario() {
    let state = patch::apply(
        &StyleState::default(),
        "border",
        json!({
            "width": "2",
            "color": "#ff0000",
            "style": "solid",
            "radius": { "all": 8, "tl": 0, "tr": 0, "br": 0, "bl": 0 }
        }),
    )
    .unwrap();
    let styles = generate_styles(&state);
    assert_eq!(styles.get("border"), Some("2px solid #ff0000"));
    assert_eq!(styles.get("border-radius"), Some("8px"));
}

#[test]
fn radius_precedence_scenario() {
    let state = patch::apply(&StyleState::default(), "border.radius.all", json!(12)).unwrap();
    let state = patch::apply(&state, "border.radius.tl", json!(4)).unwrap();
    assert_eq!(generate_styles(&state).get("border-radius"), Some("12px"));

    let state = patch::apply(&state, "border.radius.all", json!(0)).unwrap();
    assert_eq!(
        generate_styles(&state).get("border-radius"),
        Some("4px 0px 0px 0px")
    );
}
