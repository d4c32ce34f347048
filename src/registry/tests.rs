//! Tests for the tool label registry

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_registered_title() {
    let mut registry = ToolRegistry::new();
    registry.register("fetch_weather", "fetching weather", "");

    assert_eq!(registry.title_for("fetch_weather"), "fetching weather");
    assert!(registry.contains("fetch_weather"));
}

#[test]
fn test_unregistered_title_falls_back() {
    let registry = ToolRegistry::new();
    assert_eq!(registry.title_for("lookup_flight"), "calling lookup_flight");
    assert_eq!(registry.description_for("lookup_flight"), "");
    assert!(registry.is_empty());
}

#[test]
fn test_register_replaces_existing_label() {
    let mut registry = ToolRegistry::new();
    registry
        .register("send_email", "old", "first")
        .register("send_email", "✉️ sending mail", "second");

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.title_for("send_email"), "✉️ sending mail");
    assert_eq!(registry.description_for("send_email"), "second");
}

#[test]
fn test_defaults_cover_builtin_tools() {
    let registry = ToolRegistry::with_defaults();

    assert_eq!(registry.title_for(BING_GROUNDING), "🔍 searching bing");
    assert_eq!(registry.title_for(FILE_SEARCH), "📄 searching docs");
    assert_eq!(registry.title_for("fetch_stock_price"), "📈 fetching financial info");
    assert!(registry.description_for("fabric_data").contains("Fabric"));
    assert_eq!(registry.len(), 9);
}
