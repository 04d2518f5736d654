//! End-to-end pricing scenarios against the built-in catalog.

use omniprice_core::catalog::keys;
use omniprice_core::clipboard::bulk_copy_text;
use omniprice_core::{
    compute, CalculationInputs, ChannelKey, ProfitBasis, SettingsCatalog,
};

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn default_inputs_price_every_channel() {
    let results = compute(
        &CalculationInputs::default(),
        &SettingsCatalog::defaults(),
        &ChannelKey::ALL,
    );

    assert_eq!(results.len(), 4);
    for result in &results {
        assert!(result.error.is_none(), "{}", result.channel_key);
        assert!(result.sale_price > 0.0);
        assert_eq!(result.list_price, None);
        assert_close(result.breakdown.product_cost_total, 143.0, 1e-9);
    }
}

#[test]
fn default_inputs_expected_prices() {
    let results = compute(
        &CalculationInputs::default(),
        &SettingsCatalog::defaults(),
        &ChannelKey::ALL,
    );
    let prices: Vec<f64> = results.iter().map(|r| r.sale_price).collect();

    // SITE: F = 214.02 + 143 + 36.075 + 1.44        = 394.535 / 0.77
    // TY:   F = 151.617 + 143 + 36.075 + 0.228 + 10.2 = 341.12 / 0.585
    // HB:   F = 151.617 + 143 + 36.075 + 0.228        = 330.92 / 0.62
    // PZR:  F = 205.8595 + 143 + 36.075 + 0.228       = 385.1625 / 0.68
    let expected = [519.99, 589.99, 539.99, 569.99];
    for (actual, expected) in prices.iter().zip(expected) {
        assert_close(*actual, expected, 1e-6);
    }

    let ty = &results[1];
    assert_close(ty.breakdown.commission_amount, 589.99 * 0.215, 1e-9);
    assert_close(
        ty.breakdown.net_after_commission,
        589.99 - 589.99 * 0.215,
        1e-9,
    );
    assert_close(ty.breakdown.shipping_total, 151.617, 1e-9);
    assert_close(ty.breakdown.packaging_total, 36.075, 1e-9);
    assert_close(ty.breakdown.invoice_cost, 0.228, 1e-9);
    assert_close(ty.net_profit, 589.99 * 0.785 - 341.12, 1e-6);
    assert_close(ty.profit_rate, ty.net_profit / 589.99 * 100.0, 1e-9);
}

#[test]
fn results_follow_fixed_order_for_any_subset() {
    let catalog = SettingsCatalog::defaults();
    let inputs = CalculationInputs::default();

    let subsets: [&[ChannelKey]; 3] = [
        &[ChannelKey::MarketplaceC, ChannelKey::MarketplaceA],
        &[ChannelKey::MarketplaceB, ChannelKey::Web, ChannelKey::MarketplaceC],
        &[ChannelKey::MarketplaceA],
    ];

    for subset in subsets {
        let keys: Vec<ChannelKey> = compute(&inputs, &catalog, subset)
            .iter()
            .map(|r| r.channel_key)
            .collect();
        let mut expected = subset.to_vec();
        expected.sort();
        assert_eq!(keys, expected);
    }
}

#[test]
fn compute_is_idempotent() {
    let catalog = SettingsCatalog::defaults();
    let inputs = CalculationInputs {
        discount_rate: 15.0,
        profit_basis: ProfitBasis::Markup,
        ..CalculationInputs::default()
    };

    let first = compute(&inputs, &catalog, &ChannelKey::ALL);
    let second = compute(&inputs, &catalog, &ChannelKey::ALL);
    assert_eq!(first, second);
}

#[test]
fn discount_projects_list_price() {
    let inputs = CalculationInputs {
        discount_rate: 20.0,
        ..CalculationInputs::default()
    };
    let results = compute(&inputs, &SettingsCatalog::defaults(), &[ChannelKey::Web]);

    // 519.99 / 0.8 = 649.9875
    assert_close(results[0].list_price.unwrap(), 649.99, 1e-6);
}

#[test]
fn full_discount_has_no_list_price() {
    let inputs = CalculationInputs {
        discount_rate: 100.0,
        ..CalculationInputs::default()
    };
    let results = compute(&inputs, &SettingsCatalog::defaults(), &ChannelKey::ALL);
    assert!(results.iter().all(|r| r.list_price.is_none()));
}

#[test]
fn unreachable_target_is_channel_local() {
    let inputs = CalculationInputs {
        target_profit_rate: 90.0,
        ..CalculationInputs::default()
    };
    let results = compute(&inputs, &SettingsCatalog::defaults(), &ChannelKey::ALL);

    // only the 3% web POS leaves room for a 90% margin
    assert!(results[0].is_ok());
    for result in &results[1..] {
        assert!(result.error.is_some());
        assert_eq!(result.sale_price, 0.0);
        assert_eq!(result.profit_rate, 0.0);
        assert_eq!(result.list_price, None);
    }

    let text = bulk_copy_text(&results, &ChannelKey::ALL).unwrap();
    assert_eq!(text, format!("SITE: {}", omniprice_core::money::format_amount(results[0].sale_price)));
}

#[test]
fn markup_commission_at_hundred_percent_fails() {
    let mut catalog = SettingsCatalog::defaults();
    catalog.update_value(keys::HB_COMMISSION, 100.0).unwrap();

    let inputs = CalculationInputs {
        profit_basis: ProfitBasis::Markup,
        ..CalculationInputs::default()
    };
    let results = compute(&inputs, &catalog, &[ChannelKey::MarketplaceB]);
    assert_eq!(
        results[0].error.as_deref(),
        Some("Commission cannot be 100% or more")
    );
}

#[test]
fn zero_costs_price_at_zero() {
    let mut catalog = SettingsCatalog::defaults();
    let all_keys: Vec<String> = catalog.iter().map(|s| s.key.clone()).collect();
    for key in all_keys {
        catalog.update_value(&key, 0.0).unwrap();
    }
    let inputs = CalculationInputs {
        product_cost_ex_vat: 0.0,
        profit_basis: ProfitBasis::Markup,
        ..CalculationInputs::default()
    };

    let results = compute(&inputs, &catalog, &ChannelKey::ALL);
    for result in &results {
        assert!(result.is_ok());
        assert_eq!(result.sale_price, 0.0);
        assert_eq!(result.profit_rate, 0.0);
    }
}
