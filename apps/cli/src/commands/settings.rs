//! # Settings Commands
//!
//! Listing and editing the cost catalog.
//!
//! Edits are made on a copy of the catalog, validated, persisted, and only
//! then swapped into the workspace.

use tracing::{debug, info};

use omniprice_core::validation::{coerce_number, validate_key, validate_setting_value};
use omniprice_core::{CostSetting, SettingsCatalog, VatMode};
use omniprice_db::SnapshotKind;

use crate::error::ApiError;
use crate::state::{DbState, WorkspaceState};

/// Gets the current cost catalog.
pub fn list_settings(workspace: &WorkspaceState) -> SettingsCatalog {
    debug!("list_settings command");
    workspace.with_workspace(|ws| ws.settings.clone())
}

/// Changes one setting's value and, for currency settings, its VAT terms.
///
/// ## Arguments
/// * `key` - Setting key, e.g. `tyCommission`
/// * `value` - New value as typed; `12,5` reads as 12.5, garbage as 0
/// * `vat_mode` / `vat_rate` - Only valid on currency settings
///
/// ## Errors
/// - `NOT_FOUND` if the key is not in the catalog
/// - `VALIDATION_ERROR` for out-of-range values, VAT terms on a percentage,
///   or a catalog holding a setting with the wrong unit
pub async fn set_setting(
    db: &DbState,
    workspace: &WorkspaceState,
    key: &str,
    value: &str,
    vat_mode: Option<VatMode>,
    vat_rate: Option<&str>,
) -> Result<CostSetting, ApiError> {
    let key = validate_key(key)?;
    let value = coerce_number(value);
    let vat_rate = vat_rate.map(coerce_number);
    debug!(key = %key, value, ?vat_mode, ?vat_rate, "set_setting command");

    let mut catalog = list_settings(workspace);
    catalog.update_value(&key, value)?;
    if vat_mode.is_some() || vat_rate.is_some() {
        catalog.update_vat(&key, vat_mode, vat_rate)?;
    }

    let setting = catalog
        .get(&key)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Setting", &key))?;
    validate_setting_value(&key, &setting.cost)?;
    catalog.check_units()?;

    db.inner()
        .snapshots()
        .save(SnapshotKind::Settings, &catalog)
        .await?;
    workspace.with_workspace_mut(|ws| ws.settings = catalog);

    info!(key = %key, "Cost setting updated");
    Ok(setting)
}

/// Restores the built-in catalog.
pub async fn reset_settings(
    db: &DbState,
    workspace: &WorkspaceState,
) -> Result<SettingsCatalog, ApiError> {
    debug!("reset_settings command");

    let catalog = SettingsCatalog::defaults();
    db.inner()
        .snapshots()
        .save(SnapshotKind::Settings, &catalog)
        .await?;
    workspace.with_workspace_mut(|ws| ws.settings = catalog.clone());

    info!("Cost settings reset to defaults");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::fresh_state;
    use crate::error::ErrorCode;
    use omniprice_core::catalog::keys;
    use omniprice_core::CostValue;

    #[tokio::test]
    async fn test_set_percentage_setting() {
        let (db, workspace) = fresh_state().await;

        let setting = set_setting(&db, &workspace, "tyCommission", "19,5", None, None)
            .await
            .unwrap();
        assert_eq!(setting.cost, CostValue::percentage(19.5));
        assert_eq!(workspace.with_workspace(|ws| ws.settings.percentage(keys::TY_COMMISSION)), 19.5);

        let stored: Option<SettingsCatalog> = db
            .inner()
            .snapshots()
            .load(SnapshotKind::Settings)
            .await
            .unwrap();
        assert_eq!(stored, Some(list_settings(&workspace)));
    }

    #[tokio::test]
    async fn test_set_currency_vat_terms() {
        let (db, workspace) = fresh_state().await;

        let setting = set_setting(
            &db,
            &workspace,
            " box ",
            "13",
            Some(VatMode::TaxInclusive),
            Some("10"),
        )
        .await
        .unwrap();

        assert_eq!(setting.cost, CostValue::currency(13.0, VatMode::TaxInclusive, 10.0));
        assert_eq!(setting.cost.inclusive_amount(), 13.0);
    }

    #[tokio::test]
    async fn test_set_unknown_key() {
        let (db, workspace) = fresh_state().await;

        let err = set_setting(&db, &workspace, "shipFee", "10", None, None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_set_rejects_bad_values_without_saving() {
        let (db, workspace) = fresh_state().await;

        let err = set_setting(&db, &workspace, "box", "-1", None, None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = set_setting(&db, &workspace, "fgRate", "25", Some(VatMode::TaxExclusive), None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(list_settings(&workspace), SettingsCatalog::defaults());
        assert_eq!(db.inner().snapshots().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_set_rejects_huge_values() {
        let (db, workspace) = fresh_state().await;

        let err = set_setting(&db, &workspace, "siteShip", "1e308", None, None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = set_setting(&db, &workspace, "tyCommission", "5000", None, None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = set_setting(&db, &workspace, "box", "13", None, Some("1e308"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(list_settings(&workspace), SettingsCatalog::defaults());
        assert_eq!(db.inner().snapshots().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_set_refuses_to_save_mistyped_catalog() {
        let (db, workspace) = fresh_state().await;
        workspace.with_workspace_mut(|ws| {
            ws.settings = SettingsCatalog::new(
                SettingsCatalog::defaults()
                    .iter()
                    .cloned()
                    .map(|mut s| {
                        if s.key == keys::SITE_POS {
                            s.cost = CostValue::currency(3.0, VatMode::TaxExclusive, 20.0);
                        }
                        s
                    })
                    .collect(),
            );
        });

        let err = set_setting(&db, &workspace, "box", "13", None, None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Setting sitePos is a currency setting, expected percentage");
        assert_eq!(db.inner().snapshots().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let (db, workspace) = fresh_state().await;
        set_setting(&db, &workspace, "siteShip", "99", None, None)
            .await
            .unwrap();

        let catalog = reset_settings(&db, &workspace).await.unwrap();
        assert_eq!(catalog, SettingsCatalog::defaults());
        assert_eq!(list_settings(&workspace), SettingsCatalog::defaults());
    }
}
