//! Conversion: AssetResponse → Asset (TryFrom + validation).

use super::wire;
use super::{Asset, ValidationError};

impl TryFrom<wire::AssetResponse> for Asset {
    type Error = ValidationError;

    fn try_from(source: wire::AssetResponse) -> Result<Self, Self::Error> {
        let mut errors: Vec<ValidationError> = Vec::new();

        if source.id.trim().is_empty() {
            errors.push(ValidationError::MissingId);
        }

        let name = non_empty(source.name).unwrap_or_else(|| {
            errors.push(ValidationError::MissingName);
            String::new()
        });
        let symbol = non_empty(source.symbol).unwrap_or_else(|| {
            errors.push(ValidationError::MissingSymbol);
            String::new()
        });
        let price_usd = non_empty(source.price_usd).unwrap_or_else(|| {
            errors.push(ValidationError::MissingPrice);
            String::new()
        });
        let rank = match source.rank.as_deref().map(str::parse::<u32>) {
            Some(Ok(rank)) => rank,
            Some(Err(_)) | None => {
                errors.push(ValidationError::InvalidRank(
                    source.rank.clone().unwrap_or_default(),
                ));
                0
            }
        };

        if !errors.is_empty() {
            return Err(ValidationError::Multiple(source.id, errors));
        }

        Ok(Asset {
            id: source.id.into(),
            rank,
            symbol,
            name,
            price_usd,
            change_percent_24h: source.change_percent_24h.unwrap_or_default(),
            market_cap_usd: source.market_cap_usd.unwrap_or_default(),
            volume_usd_24h: source.volume_usd_24h.unwrap_or_default(),
            supply: non_empty(source.supply),
            max_supply: non_empty(source.max_supply),
            vwap_24h: non_empty(source.vwap_24h),
            explorer: non_empty(source.explorer),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
