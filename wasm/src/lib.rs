use nps_card_renderer::{CardLayout, parse_portfolio, validate};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardRenderOptions {
    width: Option<u32>,
    height: Option<u32>,
}

fn build_layout(options: CardRenderOptions) -> Result<CardLayout, String> {
    let defaults = CardLayout::default();
    CardLayout::new(
        options.width.unwrap_or(defaults.width()),
        options.height.unwrap_or(defaults.height()),
    )
    .map_err(|error| error.to_string())
}

fn render(portfolio_json: &str, options_json: Option<&str>) -> Result<String, String> {
    let options = match options_json {
        Some(raw_options) => serde_json::from_str::<CardRenderOptions>(raw_options)
            .map_err(|error| error.to_string())?,
        None => CardRenderOptions::default(),
    };
    let layout = build_layout(options)?;
    let portfolio = parse_portfolio(portfolio_json).map_err(|error| error.to_string())?;
    validate(&portfolio)
        .into_result()
        .map_err(|error| error.to_string())?;
    Ok(nps_card_renderer::render_card_svg(&portfolio, &layout))
}

#[wasm_bindgen]
pub fn render_card_svg(
    portfolio_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    render(portfolio_json, options_json.as_deref()).map_err(|error| JsValue::from_str(&error))
}
