use super::*;

#[test]
fn unknown_ids_resolve_to_modern() {
    let modern = resolve_style("modern");
    for id in ["", "Modern", "neon", "minimal ", "🙂"] {
        assert_eq!(resolve_style(id), modern, "id {id:?}");
        assert_eq!(TemplateId::from_name(id), TemplateId::Modern);
    }
}

#[test]
fn every_builtin_name_round_trips() {
    for id in TemplateId::ALL {
        assert_eq!(TemplateId::from_name(id.as_str()), id);
        assert_eq!(resolve_style(id.as_str()), id.style());
    }
}

#[test]
fn minimal_is_the_only_solid_template() {
    for id in TemplateId::ALL {
        let style = id.style();
        match (&style.background, id) {
            (Background::Solid(c), TemplateId::Minimal) => assert_eq!(*c, Rgba8::WHITE),
            (Background::LinearGradient(stops), other) => {
                assert_ne!(other, TemplateId::Minimal);
                assert_eq!(stops.len(), 2);
                assert_eq!(stops[0].offset, 0.0);
                assert_eq!(stops[1].offset, 1.0);
            }
            (bg, other) => panic!("unexpected background {bg:?} for {other:?}"),
        }
    }
}

#[test]
fn modern_palette_matches_brand_colors() {
    let style = TemplateId::Modern.style();
    assert_eq!(style.text_color.to_hex(), "#ffffff");
    assert_eq!(style.accent_color.to_hex(), "#ffd700");
    let Background::LinearGradient(stops) = style.background else {
        panic!("modern must be a gradient");
    };
    assert_eq!(stops[0].color.to_hex(), "#0077b5");
    assert_eq!(stops[1].color.to_hex(), "#004182");
}

#[test]
fn initials_are_dark_only_on_minimal() {
    assert_eq!(TemplateId::Minimal.initials_color().to_hex(), "#1f2937");
    assert_eq!(TemplateId::Dark.initials_color(), Rgba8::WHITE);
    assert_eq!(TemplateId::Creative.initials_color(), Rgba8::WHITE);
}

#[test]
fn serde_uses_lowercase_names() {
    let id: TemplateId = serde_json::from_str("\"corporate\"").unwrap();
    assert_eq!(id, TemplateId::Corporate);
    assert_eq!(serde_json::to_string(&TemplateId::Elegant).unwrap(), "\"elegant\"");
}
