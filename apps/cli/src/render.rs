//! # Text Rendering
//!
//! Plain-text views of command results for the terminal.
//!
//! ```text
//! Web (SITE)
//!   Sale price                519,99 TL
//!   Net profit                ...
//!   ...
//! Trendyol (TY)
//!   ERROR: Target profit is unreachable at this commission rate
//! ```

use omniprice_core::{ChannelResult, CostSetting, CostValue, SettingsCatalog, VatMode};

use crate::commands::calc::CalculationResponse;
use crate::commands::channels::ChannelStatus;
use crate::commands::status::StatusResponse;
use crate::state::ConfigState;

const LABEL_WIDTH: usize = 20;
const VALUE_WIDTH: usize = 16;

fn row(label: &str, value: String) -> String {
    format!("  {:<lw$}{:>vw$}", label, value, lw = LABEL_WIDTH, vw = VALUE_WIDTH)
}

// =============================================================================
// Calculation
// =============================================================================

/// Inputs line followed by one block per selected channel.
pub fn results(response: &CalculationResponse, config: &ConfigState) -> String {
    let inputs = &response.inputs;
    let mut lines = vec![format!(
        "Cost {} + VAT {} | returns {} | target {} {} | overhead {} | discount {}",
        config.format_currency(inputs.product_cost_ex_vat),
        config.format_percent(inputs.product_vat_rate),
        config.format_percent(inputs.return_rate),
        config.format_percent(inputs.target_profit_rate),
        inputs.profit_basis,
        if inputs.include_overhead { "on" } else { "off" },
        config.format_percent(inputs.discount_rate),
    )];

    if response.results.is_empty() {
        lines.push(String::new());
        lines.push("No channels selected. Use `omniprice channels toggle <code>`.".to_string());
    }

    for result in &response.results {
        lines.push(String::new());
        lines.extend(channel_block(result, response, config));
    }

    lines.join("\n")
}

fn channel_block(
    result: &ChannelResult,
    response: &CalculationResponse,
    config: &ConfigState,
) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", result.channel_name, result.channel_key.code())];

    if let Some(error) = &result.error {
        lines.push(format!("  ERROR: {}", error));
        return lines;
    }

    let money = |v: f64| config.format_currency(v);
    let b = &result.breakdown;
    let p = &b.packaging_details;

    lines.push(row("Sale price", money(result.sale_price)));
    if let Some(list_price) = result.list_price {
        lines.push(row("List price", money(list_price)));
    }
    lines.push(row("Net profit", money(result.net_profit)));
    lines.push(row(
        "Profit rate",
        format!("{} {}", config.format_percent(result.profit_rate), response.inputs.profit_basis),
    ));
    lines.push(row("Commission", money(b.commission_amount)));
    lines.push(row("After commission", money(b.net_after_commission)));
    lines.push(row("Shipping", money(b.shipping_total)));
    lines.push(format!(
        "{}  (box {} · card {} · bag {} · tape {})",
        row("Packaging", money(b.packaging_total)),
        config.format_number(p.box_cost),
        config.format_number(p.card),
        config.format_number(p.bag),
        config.format_number(p.tape),
    ));
    lines.push(row("Product cost", money(b.product_cost_total)));
    lines.push(row("Platform fee", money(b.platform_fee)));
    lines.push(row("e-Invoice", money(b.invoice_cost)));
    lines
}

// =============================================================================
// Settings
// =============================================================================

/// One line per setting, in catalog order.
pub fn settings(catalog: &SettingsCatalog, config: &ConfigState) -> String {
    catalog
        .iter()
        .map(|setting| setting_line(setting, config))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `key  label  value unit  VAT terms`
pub fn setting_line(setting: &CostSetting, config: &ConfigState) -> String {
    let vat = match setting.cost {
        CostValue::Percentage { .. } => String::new(),
        CostValue::Currency { vat_mode, .. } => {
            let rate = config.format_percent(setting.cost.effective_vat_rate().unwrap_or_default());
            match vat_mode {
                VatMode::TaxInclusive => format!("  VAT {} incl.", rate),
                VatMode::TaxExclusive => format!("  +VAT {}", rate),
            }
        }
    };

    format!(
        "{:<20}{:<34}{:>12} {}{}",
        setting.key,
        setting.label,
        config.format_number(setting.cost.raw()),
        setting.suffix(&config.currency_symbol),
        vat,
    )
}

// =============================================================================
// Channels, Config, Status
// =============================================================================

/// `[x] CODE  Name` per channel.
pub fn channels(channels: &[ChannelStatus]) -> String {
    channels
        .iter()
        .map(|c| format!("[{}] {:<10}{}", if c.selected { "x" } else { " " }, c.code, c.name))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn config(config: &ConfigState) -> String {
    [
        format!("currency symbol     {}", config.currency_symbol),
        format!("currency decimals   {}", config.currency_decimals),
        format!("decimal separator   {}", config.decimal_separator),
        format!("thousands separator {}", config.thousands_separator),
        format!(
            "database path       {}",
            config
                .database_path
                .as_ref()
                .map_or_else(|| "(default)".to_string(), |p| p.display().to_string())
        ),
    ]
    .join("\n")
}

pub fn status(status: &StatusResponse) -> String {
    let mut lines = vec![
        format!(
            "database      {}",
            status.database_path.as_deref().unwrap_or("(default)")
        ),
        format!("healthy       {}", if status.healthy { "yes" } else { "no" }),
        format!(
            "migrations    {}/{} applied",
            status.migrations_applied, status.migrations_total
        ),
    ];
    for part in &status.stored {
        let when = part
            .updated_at
            .map_or_else(|| "defaults".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string());
        lines.push(format!("{:<14}{}", part.part, when));
    }
    lines.join("\n")
}
