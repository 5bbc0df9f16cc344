#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::errors::{EntityKind, Error};
    use crate::fx::{
        ExchangeRateInput, ExchangeRateService, ExchangeRateServiceTrait, ExchangeRateUpdate,
    };
    use crate::test_utils::{MockCurrencyRepository, MockExchangeRateRepository};

    struct Fixture {
        currencies: Arc<MockCurrencyRepository>,
        rates: Arc<MockExchangeRateRepository>,
        service: ExchangeRateService,
    }

    /// RUB base with USD 1 = 90, EUR 1 = 100, JPY 100 = 50, and GBP without a rate.
    fn fixture() -> Fixture {
        let currencies = Arc::new(MockCurrencyRepository::with(&[
            ("RUB", "Russian Ruble", "₽"),
            ("USD", "US Dollar", "$"),
            ("EUR", "Euro", "€"),
            ("JPY", "Japanese Yen", "¥"),
            ("GBP", "Pound Sterling", "£"),
        ]));
        let rates = Arc::new(MockExchangeRateRepository::new());
        rates.push(2, 1, dec!(90));
        rates.push(3, 1, dec!(100));
        rates.push(4, 100, dec!(50));

        let service = ExchangeRateService::new(currencies.clone(), rates.clone(), "rub");
        Fixture {
            currencies,
            rates,
            service,
        }
    }

    fn rate_input(code: &str, nominal: &str, rate: &str) -> ExchangeRateInput {
        ExchangeRateInput {
            currency_code: Some(code.to_string()),
            nominal: Some(nominal.to_string()),
            rate: Some(rate.to_string()),
        }
    }

    #[tokio::test]
    async fn test_add_exchange_rate() {
        let f = fixture();

        let view = f
            .service
            .add_exchange_rate(rate_input("gbp", "1", "115.25"))
            .await
            .unwrap();

        assert_eq!(view.currency.code, "GBP");
        assert_eq!(view.nominal, 1);
        assert_eq!(view.rate, dec!(115.25));
        assert_eq!(f.rates.count(), 4);
    }

    #[tokio::test]
    async fn test_add_duplicate_exchange_rate_fails() {
        let f = fixture();
        let err = f
            .service
            .add_exchange_rate(rate_input("USD", "1", "91"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateEntity { kind: EntityKind::ExchangeRate, ref key } if key == "USD"
        ));
    }

    #[tokio::test]
    async fn test_add_rate_for_unknown_currency_fails() {
        let f = fixture();
        let err = f
            .service
            .add_exchange_rate(rate_input("CHF", "1", "95"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::EntityNotFound { kind: EntityKind::Currency, ref key } if key == "CHF"
        ));
    }

    #[tokio::test]
    async fn test_add_rate_validation_errors() {
        let f = fixture();
        let err = f
            .service
            .add_exchange_rate(rate_input("GBP", "0", "0.1234567"))
            .await
            .unwrap_err();
        match err {
            Error::Validation(errors) => {
                assert_eq!(errors.field_errors().len(), 2);
                assert!(errors.get("nominal").is_some());
                assert!(errors.get("rate").is_some());
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_exchange_rates_joined_with_currency() {
        let f = fixture();
        let views = f.service.get_exchange_rates().unwrap();

        let codes: Vec<&str> = views.iter().map(|v| v.currency.code.as_str()).collect();
        assert_eq!(codes, vec!["USD", "EUR", "JPY"]);

        let jpy = f.service.get_exchange_rate("jpy").unwrap();
        assert_eq!(jpy.nominal, 100);
        assert_eq!(jpy.rate, dec!(50));
    }

    #[tokio::test]
    async fn test_get_missing_exchange_rate_fails() {
        let f = fixture();
        let err = f.service.get_exchange_rate("GBP").unwrap_err();
        assert!(matches!(
            err,
            Error::EntityNotFound { kind: EntityKind::ExchangeRate, .. }
        ));
    }

    #[tokio::test]
    async fn test_update_exchange_rate_in_place() {
        let f = fixture();
        let before = f.service.get_exchange_rate("USD").unwrap();

        let after = f
            .service
            .update_exchange_rate(
                "usd",
                ExchangeRateUpdate {
                    nominal: Some("10".to_string()),
                    rate: Some("905.5".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(after.id, before.id);
        assert_eq!(after.nominal, 10);
        assert_eq!(after.rate, dec!(905.5));
        assert_eq!(f.rates.count(), 3);
    }

    #[tokio::test]
    async fn test_update_exchange_rate_rejects_malformed_code() {
        let f = fixture();

        let err = f
            .service
            .update_exchange_rate(
                "12",
                ExchangeRateUpdate {
                    nominal: Some("1".to_string()),
                    rate: Some("91".to_string()),
                },
            )
            .await
            .unwrap_err();

        match err {
            Error::Validation(errors) => {
                assert_eq!(
                    errors.get("code"),
                    Some("Currency code must be 3 characters long.")
                );
                assert!(errors.get("rate").is_none());
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
        assert_eq!(f.service.get_exchange_rate("USD").unwrap().rate, dec!(90));
    }

    #[tokio::test]
    async fn test_delete_exchange_rate() {
        let f = fixture();
        f.service.delete_exchange_rate("EUR").await.unwrap();

        assert_eq!(f.rates.count(), 2);
        assert!(f.rates.find(3).is_none());
        // The currency itself stays
        assert_eq!(f.currencies.count(), 5);

        let err = f.service.delete_exchange_rate("EUR").await.unwrap_err();
        assert!(matches!(err, Error::EntityNotFound { .. }));
    }

    #[test]
    fn test_cross_rate_same_currency_is_one() {
        let f = fixture();
        assert_eq!(f.service.calculate_cross_rate("USD", "usd").unwrap(), Decimal::ONE);
        assert_eq!(f.service.calculate_cross_rate("RUB", "RUB").unwrap(), Decimal::ONE);
        // No stored rate needed
        assert_eq!(f.service.calculate_cross_rate("XYZ", "XYZ").unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_cross_rate_against_base() {
        let f = fixture();
        assert_eq!(f.service.calculate_cross_rate("USD", "RUB").unwrap(), dec!(90));
        assert_eq!(f.service.calculate_cross_rate("JPY", "RUB").unwrap(), dec!(0.5));
        assert_eq!(f.service.calculate_cross_rate("RUB", "JPY").unwrap(), dec!(2));
        assert_eq!(
            f.service.calculate_cross_rate("RUB", "USD").unwrap(),
            dec!(0.011111111111)
        );
    }

    #[test]
    fn test_cross_rate_between_quoted_currencies() {
        let f = fixture();
        // One USD buys 0.9 EUR
        assert_eq!(f.service.calculate_cross_rate("USD", "EUR").unwrap(), dec!(0.9));
        // One USD buys 180 JPY
        assert_eq!(f.service.calculate_cross_rate("usd", "jpy").unwrap(), dec!(180));

        let there = f.service.calculate_cross_rate("EUR", "USD").unwrap();
        let back = f.service.calculate_cross_rate("USD", "EUR").unwrap();
        assert!((there * back - Decimal::ONE).abs() < dec!(0.000000001));
    }

    #[test]
    fn test_cross_rate_missing_rate_names_currency() {
        let f = fixture();
        let err = f.service.calculate_cross_rate("USD", "GBP").unwrap_err();
        assert!(matches!(
            err,
            Error::EntityNotFound { kind: EntityKind::ExchangeRate, ref key } if key == "GBP"
        ));

        let err = f.service.calculate_cross_rate("CHF", "RUB").unwrap_err();
        assert!(matches!(
            err,
            Error::EntityNotFound { kind: EntityKind::Currency, ref key } if key == "CHF"
        ));
    }

    #[test]
    fn test_convert() {
        let f = fixture();
        let result = f.service.convert("usd", "RUB", dec!(10.5)).unwrap();
        assert_eq!(result.from, "USD");
        assert_eq!(result.to, "RUB");
        assert_eq!(result.rate, dec!(90));
        assert_eq!(result.converted_amount, dec!(945.00));

        let result = f.service.convert("RUB", "USD", dec!(100)).unwrap();
        assert_eq!(result.converted_amount, dec!(1.11));
    }
}
