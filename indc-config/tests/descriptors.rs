use std::sync::Arc;

use indc_config::{
    builtin_indicator_names, load_indicator, load_indicator_toml, register_indicator_factory,
    ConfigError, ConfigResult, IndicatorFactory, IndicatorRegistry,
};
use indc_indicators::indicators::{Dema, Ema, Macd, Roc};
use indc_indicators::{Indicator, IndicatorError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

#[test]
fn decoded_indicators_calculate_like_hand_built_ones() {
    let prices: Vec<Decimal> = (1..=40).map(|idx| Decimal::from(idx * idx % 17 + 50)).collect();
    let decoded = load_indicator(&json!({
        "name": "macd",
        "indicator1": {"name": "ema", "length": 5},
        "indicator2": {"name": "dema", "length": 8}
    }))
    .unwrap();
    let built = Macd::new(Ema::new(5), Dema::new(8));
    assert_eq!(decoded.count(), built.count());
    assert_eq!(decoded.calc(&prices), built.calc(&prices));
}

#[test]
fn toml_descriptors_decode() {
    let descriptor: toml::Value = toml::from_str(
        r#"
name = "cci"
indicator = { name = "wma", length = 3 }
"#,
    )
    .unwrap();
    let cci = load_indicator_toml(&descriptor).unwrap();
    assert_eq!(cci.count(), 3);
    let value = cci.calc(&[dec!(1), dec!(2), dec!(3)]).unwrap();
    assert!(value > Decimal::ZERO);
}

#[test]
fn unknown_tags_are_rejected() {
    for descriptor in [json!({"name": "bollinger"}), json!({}), json!("sma"), json!(null)] {
        let err = load_indicator(&descriptor).unwrap_err();
        assert!(
            matches!(err, ConfigError::Indicator(IndicatorError::IndicatorNotSet { .. })),
            "{descriptor}"
        );
    }
}

struct Momentum;

impl IndicatorFactory for Momentum {
    fn canonical_name(&self) -> &'static str {
        "momentum"
    }

    fn build(
        &self,
        params: &Value,
        _registry: &IndicatorRegistry,
    ) -> ConfigResult<Box<dyn Indicator>> {
        let length = params.get("length").and_then(Value::as_u64).unwrap_or(0) as usize;
        Ok(Box::new(Roc::new(length)))
    }
}

#[test]
fn new_kinds_plug_into_existing_composites() {
    register_indicator_factory(Arc::new(Momentum));
    assert!(builtin_indicator_names().contains(&"momentum"));

    let macd = load_indicator(&json!({
        "name": "macd",
        "indicator1": {"name": "momentum", "length": 3},
        "indicator2": {"name": "roc", "length": 3}
    }))
    .unwrap();
    assert_eq!(macd.calc(&[dec!(2), dec!(3), dec!(4)]).unwrap(), Decimal::ZERO);
}
