// ═══════════════════════════════════════════════════════════════════
// Engine Tests — accrual, lifecycle classification, position views,
// rate tables, and property checks over the pure functions
// ═══════════════════════════════════════════════════════════════════

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use crypto_wallet_core::errors::WalletError;
use crypto_wallet_core::models::currency::Currency;
use crypto_wallet_core::models::ledger::Ledger;
use crypto_wallet_core::models::position::{DepositPosition, StakePosition};
use crypto_wallet_core::models::status::PositionState;
use crypto_wallet_core::services::accrual::{
    accrue, days_between, fractional_days_between, implied_apy,
};
use crypto_wallet_core::services::lifecycle::classify;
use crypto_wallet_core::services::position_service::PositionService;
use crypto_wallet_core::services::rates::{
    deposit_apy, deposit_tier, staking_apy, swap_quote, DEPOSIT_TIERS,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn approx(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected} ± {tol}, got {actual}"
    );
}

// ═══════════════════════════════════════════════════════════════════
// Accrual
// ═══════════════════════════════════════════════════════════════════

mod accrual {
    use super::*;

    #[test]
    fn full_year_at_ten_percent() {
        approx(accrue(1000.0, 10.0, 365.0), 100.0, 1e-9);
    }

    #[test]
    fn deposit_example() {
        // 5035 USDT at 25.54% for 169 days
        approx(accrue(5035.0, 25.54, 169.0), 595.4074, 1e-3);
    }

    #[test]
    fn zero_inputs_yield_zero() {
        assert_eq!(accrue(0.0, 12.0, 30.0), 0.0);
        assert_eq!(accrue(500.0, 0.0, 30.0), 0.0);
        assert_eq!(accrue(500.0, 12.0, 0.0), 0.0);
    }

    #[test]
    fn not_rounded() {
        let v = accrue(1.0, 1.0, 1.0);
        approx(v, 1.0 / 36_500.0, 1e-15);
        assert_ne!(v, 0.0);
    }

    #[test]
    fn fractional_days() {
        approx(accrue(365.0, 100.0, 0.5), 0.5, 1e-12);
    }

    #[test]
    fn days_between_floors() {
        let start = at(2025, 1, 1, 12, 0);
        assert_eq!(days_between(start, at(2025, 1, 2, 11, 59)), 0);
        assert_eq!(days_between(start, at(2025, 1, 2, 12, 0)), 1);
        assert_eq!(days_between(start, at(2025, 1, 11, 18, 0)), 10);
    }

    #[test]
    fn days_between_negative_floors_down() {
        let start = at(2025, 1, 2, 0, 0);
        assert_eq!(days_between(start, at(2025, 1, 1, 12, 0)), -1);
    }

    #[test]
    fn fractional_days_between_halves() {
        approx(
            fractional_days_between(at(2025, 1, 1, 0, 0), at(2025, 1, 1, 12, 0)),
            0.5,
            1e-12,
        );
    }

    #[test]
    fn implied_apy_roundtrips() {
        let start = at(2025, 7, 25, 19, 30);
        let end = at(2026, 1, 10, 0, 0);
        let apy = implied_apy(5035.0, 730.0, start, end).unwrap();
        let days = days_between(start, end);
        assert_eq!(days, 168);
        approx(accrue(5035.0, apy, days as f64), 730.0, 1e-9);
    }

    #[test]
    fn implied_apy_rejects_short_range() {
        let start = at(2025, 1, 1, 0, 0);
        let err = implied_apy(100.0, 1.0, start, at(2025, 1, 1, 23, 0)).unwrap_err();
        assert!(matches!(err, WalletError::InvalidDateRange { .. }));
    }

    #[test]
    fn implied_apy_rejects_reversed_range() {
        let err = implied_apy(100.0, 1.0, at(2025, 2, 1, 0, 0), at(2025, 1, 1, 0, 0)).unwrap_err();
        assert!(matches!(err, WalletError::InvalidDateRange { .. }));
    }

    #[test]
    fn implied_apy_rejects_zero_principal() {
        let err = implied_apy(0.0, 1.0, at(2025, 1, 1, 0, 0), at(2025, 2, 1, 0, 0)).unwrap_err();
        assert!(matches!(err, WalletError::ZeroPrincipal));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Lifecycle
// ═══════════════════════════════════════════════════════════════════

mod lifecycle {
    use super::*;

    #[test]
    fn halfway_is_active() {
        let lc = classify(at(2025, 1, 1, 0, 0), at(2025, 1, 31, 0, 0), at(2025, 1, 16, 0, 0));
        assert_eq!(lc.state, PositionState::Active);
        approx(lc.progress, 50.0, 1e-9);
        assert_eq!(lc.days_elapsed, 15);
        assert_eq!(lc.days_remaining, 15);
    }

    #[test]
    fn seeded_deposit_midway() {
        let lc = classify(
            at(2025, 7, 25, 19, 30),
            at(2026, 1, 10, 0, 0),
            at(2025, 9, 1, 20, 0),
        );
        assert_eq!(lc.state, PositionState::Active);
        assert_eq!(lc.days_elapsed, 38);
        approx(lc.progress, 22.8, 0.5);
        assert_eq!(lc.days_remaining, 131);
    }

    #[test]
    fn remaining_days_ceil() {
        let lc = classify(at(2025, 1, 1, 0, 0), at(2025, 1, 11, 0, 0), at(2025, 1, 5, 6, 0));
        assert_eq!(lc.days_elapsed, 4);
        assert_eq!(lc.days_remaining, 6);
    }

    #[test]
    fn exactly_at_start_is_fresh() {
        let start = at(2025, 1, 1, 0, 0);
        let lc = classify(start, at(2025, 1, 31, 0, 0), start);
        assert!(!lc.is_matured());
        assert_eq!(lc.progress, 0.0);
        assert_eq!(lc.days_elapsed, 0);
        assert_eq!(lc.days_remaining, 30);
    }

    #[test]
    fn classification_is_deterministic() {
        let args = (at(2025, 1, 1, 0, 0), at(2025, 3, 1, 0, 0), at(2025, 2, 1, 7, 0));
        assert_eq!(classify(args.0, args.1, args.2), classify(args.0, args.1, args.2));
    }

    #[test]
    fn exactly_at_end_is_matured() {
        let end = at(2025, 1, 31, 0, 0);
        let lc = classify(at(2025, 1, 1, 0, 0), end, end);
        assert!(lc.is_matured());
        assert_eq!(lc.progress, 100.0);
        assert_eq!(lc.days_elapsed, 30);
        assert_eq!(lc.days_remaining, 0);
    }

    #[test]
    fn after_end_is_matured() {
        let lc = classify(at(2025, 1, 1, 0, 0), at(2025, 1, 31, 0, 0), at(2025, 6, 1, 0, 0));
        assert_eq!(lc.state, PositionState::Matured);
        assert_eq!(lc.progress, 100.0);
        assert_eq!(lc.days_remaining, 0);
    }

    #[test]
    fn before_start_has_zero_progress() {
        let lc = classify(at(2025, 1, 1, 0, 0), at(2025, 1, 31, 0, 0), at(2024, 12, 31, 0, 0));
        assert_eq!(lc.state, PositionState::Active);
        assert_eq!(lc.progress, 0.0);
        assert_eq!(lc.days_elapsed, -1);
        assert_eq!(lc.days_remaining, 31);
    }

    #[test]
    fn empty_range_is_matured() {
        let t = at(2025, 1, 1, 0, 0);
        let lc = classify(t, t, at(2024, 6, 1, 0, 0));
        assert!(lc.is_matured());
        assert_eq!(lc.progress, 100.0);
        assert_eq!(lc.days_remaining, 0);
    }

    #[test]
    fn reversed_range_is_matured() {
        let lc = classify(at(2025, 2, 1, 0, 0), at(2025, 1, 1, 0, 0), at(2025, 1, 15, 0, 0));
        assert!(lc.is_matured());
        assert!(lc.progress.is_finite());
    }
}

// ═══════════════════════════════════════════════════════════════════
// PositionService
// ═══════════════════════════════════════════════════════════════════

mod positions {
    use super::*;

    fn deposit() -> DepositPosition {
        // 1000 USDT at 10% for 30 days
        DepositPosition::new(
            Currency::USDT,
            1000.0,
            10.0,
            at(2025, 1, 1, 0, 0),
            30,
            accrue(1000.0, 10.0, 30.0),
        )
    }

    fn stake() -> StakePosition {
        StakePosition::new(
            Currency::ETH,
            2.0,
            4.2,
            at(2025, 1, 1, 0, 0),
            60,
            accrue(2.0, 4.2, 60.0),
        )
    }

    #[test]
    fn deposit_accrues_with_elapsed_time() {
        let status = PositionService::new().deposit_status(&deposit(), at(2025, 1, 16, 0, 0));
        assert_eq!(status.lifecycle.state, PositionState::Active);
        approx(status.accrued_interest, 1000.0 * 0.1 * 15.0 / 365.0, 1e-9);
        approx(status.total_at_maturity, 1000.0 + accrue(1000.0, 10.0, 30.0), 1e-9);
    }

    #[test]
    fn deposit_accrual_uses_fractional_days() {
        let status = PositionService::new().deposit_status(&deposit(), at(2025, 1, 1, 12, 0));
        approx(status.accrued_interest, accrue(1000.0, 10.0, 0.5), 1e-12);
    }

    #[test]
    fn deposit_accrual_caps_at_term() {
        let status = PositionService::new().deposit_status(&deposit(), at(2026, 1, 1, 0, 0));
        assert!(status.lifecycle.is_matured());
        approx(status.accrued_interest, accrue(1000.0, 10.0, 30.0), 1e-12);
    }

    #[test]
    fn deposit_before_start_accrues_nothing() {
        let status = PositionService::new().deposit_status(&deposit(), at(2024, 12, 1, 0, 0));
        assert_eq!(status.accrued_interest, 0.0);
    }

    #[test]
    fn stake_accrual_caps_at_duration() {
        let svc = PositionService::new();
        let mid = svc.stake_status(&stake(), at(2025, 1, 31, 0, 0));
        approx(mid.accrued_rewards, accrue(2.0, 4.2, 30.0), 1e-12);
        let late = svc.stake_status(&stake(), at(2025, 12, 31, 0, 0));
        assert!(late.lifecycle.is_matured());
        approx(late.accrued_rewards, late.stake.rewards, 1e-12);
    }

    #[test]
    fn partitions_by_state() {
        let mut ledger = Ledger::default();
        ledger.deposits.push(deposit());
        ledger.deposits.push(DepositPosition::new(
            Currency::USDT,
            50.0,
            9.0,
            at(2025, 3, 1, 0, 0),
            90,
            1.1,
        ));
        ledger.stakes.push(stake());

        let svc = PositionService::new();
        let now = at(2025, 3, 15, 0, 0);
        assert_eq!(svc.deposit_statuses(&ledger, now).len(), 2);
        assert_eq!(svc.active_deposits(&ledger, now).len(), 1);
        assert_eq!(svc.matured_deposits(&ledger, now).len(), 1);
        assert_eq!(svc.active_deposits(&ledger, now)[0].deposit.amount, 50.0);
        assert_eq!(svc.completed_stakes(&ledger, now).len(), 1);
        assert!(svc.active_stakes(&ledger, now).is_empty());
    }

    #[test]
    fn statuses_do_not_mutate() {
        let mut ledger = Ledger::default();
        ledger.deposits.push(deposit());
        let before = ledger.clone();
        let _ = PositionService::new().deposit_statuses(&ledger, at(2030, 1, 1, 0, 0));
        assert_eq!(ledger, before);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Rates
// ═══════════════════════════════════════════════════════════════════

mod rates {
    use super::*;

    #[test]
    fn staking_table() {
        assert_eq!(staking_apy(Currency::BTC), 0.0);
        assert_eq!(staking_apy(Currency::ETH), 4.2);
        assert_eq!(staking_apy(Currency::USDT), 8.5);
        assert_eq!(staking_apy(Currency::SOL), 7.1);
        assert_eq!(staking_apy(Currency::XRP), 3.5);
    }

    #[test]
    fn only_btc_cannot_be_staked() {
        let unstakeable: Vec<Currency> = Currency::ALL
            .into_iter()
            .filter(|c| staking_apy(*c) <= 0.0)
            .collect();
        assert_eq!(unstakeable, vec![Currency::BTC]);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(DEPOSIT_TIERS, [30, 60, 90]);
        assert_eq!(deposit_tier(1), 30);
        assert_eq!(deposit_tier(30), 30);
        assert_eq!(deposit_tier(31), 60);
        assert_eq!(deposit_tier(60), 60);
        assert_eq!(deposit_tier(61), 90);
        assert_eq!(deposit_tier(365), 90);
    }

    #[test]
    fn deposit_rates_rise_with_tier() {
        for c in Currency::ALL {
            assert!(deposit_apy(c, 30) < deposit_apy(c, 60), "{c}");
            assert!(deposit_apy(c, 60) < deposit_apy(c, 90), "{c}");
        }
    }

    #[test]
    fn usdt_deposit_rates() {
        assert_eq!(deposit_apy(Currency::USDT, 14), 9.0);
        assert_eq!(deposit_apy(Currency::USDT, 60), 10.5);
        assert_eq!(deposit_apy(Currency::USDT, 180), 12.0);
    }

    #[test]
    fn swap_at_reference_prices() {
        approx(swap_quote(Currency::BTC, Currency::USDT, 1.0), 43_250.0, 1e-9);
        approx(swap_quote(Currency::USDT, Currency::SOL, 98.0), 1.0, 1e-12);
        approx(swap_quote(Currency::ETH, Currency::ETH, 3.0), 3.0, 1e-12);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Properties
// ═══════════════════════════════════════════════════════════════════

mod properties {
    use super::*;

    fn base() -> DateTime<Utc> {
        at(2025, 1, 1, 0, 0)
    }

    proptest! {
        #[test]
        fn accrual_is_linear_in_amount(
            a in 0.0f64..1e7,
            b in 0.0f64..1e7,
            apy in 0.0f64..50.0,
            days in 0.0f64..3650.0,
        ) {
            let joint = accrue(a + b, apy, days);
            let split = accrue(a, apy, days) + accrue(b, apy, days);
            prop_assert!((joint - split).abs() <= 1e-9 * joint.abs().max(1.0));
        }

        #[test]
        fn accrual_is_linear_in_days(
            amount in 0.0f64..1e7,
            apy in 0.0f64..50.0,
            d1 in 0.0f64..2000.0,
            d2 in 0.0f64..2000.0,
        ) {
            let joint = accrue(amount, apy, d1 + d2);
            let split = accrue(amount, apy, d1) + accrue(amount, apy, d2);
            prop_assert!((joint - split).abs() <= 1e-9 * joint.abs().max(1.0));
        }

        #[test]
        fn full_year_earns_the_stated_rate(amount in 0.0f64..1e7, apy in 0.0f64..50.0) {
            let year = accrue(amount, apy, 365.0);
            let expected = amount * apy / 100.0;
            prop_assert!((year - expected).abs() <= 1e-9 * expected.max(1.0));
        }

        #[test]
        fn progress_is_bounded_and_monotone(
            length_min in 1i64..1_000_000,
            t1 in -500_000i64..1_500_000,
            step in 0i64..500_000,
        ) {
            let start = base();
            let end = start + Duration::minutes(length_min);
            let first = classify(start, end, start + Duration::minutes(t1));
            let second = classify(start, end, start + Duration::minutes(t1 + step));
            prop_assert!((0.0..=100.0).contains(&first.progress));
            prop_assert!((0.0..=100.0).contains(&second.progress));
            prop_assert!(second.progress >= first.progress);
            if first.is_matured() {
                prop_assert!(second.is_matured());
            }
        }

        #[test]
        fn matured_iff_now_reaches_end(
            length_min in 1i64..1_000_000,
            offset in -1_000_000i64..2_000_000,
        ) {
            let start = base();
            let end = start + Duration::minutes(length_min);
            let now = start + Duration::minutes(offset);
            let lc = classify(start, end, now);
            prop_assert_eq!(lc.is_matured(), now >= end);
            if lc.is_matured() {
                prop_assert_eq!(lc.progress, 100.0);
                prop_assert_eq!(lc.days_remaining, 0);
            }
        }

        #[test]
        fn implied_apy_inverts_accrual(
            principal in 1.0f64..1e6,
            profit in 0.0f64..1e5,
            days in 1i64..3650,
            extra_min in 0i64..1439,
        ) {
            let start = base();
            let end = start + Duration::days(days) + Duration::minutes(extra_min);
            let apy = implied_apy(principal, profit, start, end).unwrap();
            let back = accrue(principal, apy, days as f64);
            prop_assert!((back - profit).abs() <= 1e-9 * profit.max(1.0));
        }
    }
}
