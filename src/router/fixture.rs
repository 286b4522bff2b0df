//! Shared setup for router unit tests.

#![allow(clippy::panic)]

use alloy_primitives::{Address, U256, address};

use super::Router;
use crate::config::{RegistryConfig, RouterConfig};
use crate::domain::{AddLiquidity, CallContext, Role};
use crate::factory::PairRegistry;
use crate::ledger::InMemoryLedger;

pub(super) const ADMIN: Address = address!("0x000000000000000000000000000000000000ad01");
pub(super) const REGISTRY: Address = address!("0x00000000000000000000000000000000000000ff");
pub(super) const ROUTER: Address = address!("0x0000000000000000000000000000000000000777");
pub(super) const WETH: Address = address!("0x000000000000000000000000000000000000eeee");
pub(super) const TOKEN_A: Address = address!("0x1000000000000000000000000000000000000000");
pub(super) const TOKEN_B: Address = address!("0x2000000000000000000000000000000000000000");
pub(super) const TOKEN_C: Address = address!("0x3000000000000000000000000000000000000000");
pub(super) const BOB: Address = address!("0x0000000000000000000000000000000000000b0b");

pub(super) fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(1_000_000_000_000_000_000u64)
}

pub(super) struct Env {
    pub(super) ctx: CallContext,
    pub(super) registry: PairRegistry,
    pub(super) ledger: InMemoryLedger,
    pub(super) router: Router,
}

/// A registry the router may create pairs in, and an admin holding 1 000
/// of every token plus 1 000 native, all approved to the router.
pub(super) fn env() -> Env {
    let Ok(router_config) = RouterConfig::new(ROUTER, WETH) else {
        panic!("router config");
    };
    let Ok(router) = Router::new(&router_config) else {
        panic!("router");
    };
    let Ok(registry_config) = RegistryConfig::new(REGISTRY, ADMIN) else {
        panic!("registry config");
    };
    let Ok(mut registry) = PairRegistry::new(&registry_config) else {
        panic!("registry");
    };
    let mut ctx = CallContext::new(ADMIN, 100);
    let Ok(()) = registry.grant_role(&mut ctx, Role::PairCreator, ROUTER) else {
        panic!("grant");
    };
    ctx.take_events();

    let mut ledger = InMemoryLedger::new(WETH);
    for token in [TOKEN_A, TOKEN_B, TOKEN_C] {
        let Ok(()) = ledger.mint(token, ADMIN, ether(1_000)) else {
            panic!("mint");
        };
        ledger.approve(token, ADMIN, ROUTER, U256::MAX);
    }
    ledger.approve(WETH, ADMIN, ROUTER, U256::MAX);
    let Ok(()) = ledger.fund_native(ADMIN, ether(1_000)) else {
        panic!("fund");
    };

    Env {
        ctx,
        registry,
        ledger,
        router,
    }
}

impl Env {
    /// Seeds the `a`/`b` pair with the given amounts through the router.
    pub(super) fn seed(&mut self, a: Address, b: Address, amount_a: U256, amount_b: U256) {
        let params = AddLiquidity {
            token_a: a,
            token_b: b,
            amount_a_desired: amount_a,
            amount_b_desired: amount_b,
            amount_a_min: U256::ZERO,
            amount_b_min: U256::ZERO,
            to: ADMIN,
            deadline: u64::MAX,
        };
        let Ok(_) = self.router.add_liquidity(
            &mut self.ctx,
            &mut self.registry,
            &mut self.ledger,
            &params,
        ) else {
            panic!("seed {a}/{b}");
        };
        self.ctx.take_events();
    }

    /// Seeds the `token`/wrapped-native pair.
    pub(super) fn seed_native(&mut self, token: Address, amount: U256, native: U256) {
        let params = AddLiquidity {
            token_a: token,
            token_b: WETH,
            amount_a_desired: amount,
            amount_b_desired: native,
            amount_a_min: U256::ZERO,
            amount_b_min: U256::ZERO,
            to: ADMIN,
            deadline: u64::MAX,
        };
        let Ok(_) = self.router.add_liquidity_native(
            &mut self.ctx,
            &mut self.registry,
            &mut self.ledger,
            &params,
        ) else {
            panic!("seed {token}/native");
        };
        self.ctx.take_events();
    }
}
