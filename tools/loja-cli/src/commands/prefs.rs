//! Preference commands: country, theme and exchange rates.

use anyhow::{bail, Result};
use chrono::Utc;
use loja_commerce::currency::Country;
use loja_commerce::repository::{KvPreferences, KvRateCache, PreferenceRepository, Theme};
use serde_json::json;

use super::{CountryArgs, RatesArgs, ThemeArgs};
use crate::context::Context;

/// Run the country command.
pub async fn run_country(args: CountryArgs, ctx: &Context) -> Result<()> {
    let prefs = KvPreferences::new(ctx.open_cache()?);

    if let Some(raw) = args.country {
        let Some(country) = Country::parse(&raw) else {
            bail!("Unknown country '{}'. Available: br, us, eu", raw);
        };
        prefs.set_country(country)?;
        ctx.output.success(&format!("País: {}", country.label()));
    }

    let current = prefs.country();
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "country": current,
            "label": current.label(),
            "currency": current.currency().code(),
        }));
        return Ok(());
    }

    ctx.output.header("País");
    for country in Country::ALL {
        let marker = if country == current { "●" } else { "○" };
        ctx.output.line(&format!(
            "  {} {:<3} {} ({})",
            marker,
            country.code(),
            country.label(),
            country.currency().code()
        ));
    }
    Ok(())
}

/// Run the theme command.
pub async fn run_theme(args: ThemeArgs, ctx: &Context) -> Result<()> {
    let prefs = KvPreferences::new(ctx.open_cache()?);

    if let Some(name) = args.theme {
        let theme = Theme::new(name);
        prefs.set_theme(&theme)?;
        ctx.output.success(&format!("Tema: {}", theme));
    }

    let current = prefs.theme();
    if ctx.output.is_json() {
        ctx.output.json(&json!({ "theme": current }));
    } else {
        ctx.output.kv("Tema", current.as_str());
    }
    Ok(())
}

/// Run the rates command.
pub async fn run_rates(args: RatesArgs, ctx: &Context) -> Result<()> {
    let cache = ctx.open_cache()?;
    let mut converter = ctx.converter();

    let status = if args.cached {
        converter.apply_cached(&KvRateCache::new(cache.clone()), Utc::now());
        converter.status()
    } else {
        ctx.refresh_rates(&mut converter, &cache).await
    };

    let rows: Vec<_> = Country::ALL
        .iter()
        .map(|&country| (country, converter.settings(country)))
        .collect();

    if ctx.output.is_json() {
        let settings: Vec<_> = rows.iter().map(|(_, settings)| settings).collect();
        ctx.output.json(&json!({
            "status": status,
            "as_of": converter.rates_as_of(),
            "rates": settings,
        }));
        return Ok(());
    }

    ctx.output.header("Câmbio");
    ctx.output.kv("Origem", &status.to_string());
    if let Some(as_of) = converter.rates_as_of() {
        ctx.output
            .kv("Atualizado", &as_of.format("%Y-%m-%d %H:%M UTC").to_string());
    }
    ctx.output.line("");
    ctx.output.table_row(&["País", "", "", "Taxa", "R$ 100,00"], &[16, 4, 3, 8, 12]);
    for (country, settings) in rows {
        ctx.output.table_row(
            &[
                country.label(),
                settings.currency.code(),
                settings.symbol,
                &format!("{:.4}", settings.rate),
                &converter.format_price(100.0, country).to_string(),
            ],
            &[16, 4, 3, 8, 12],
        );
    }
    Ok(())
}
