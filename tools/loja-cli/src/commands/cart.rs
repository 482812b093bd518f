//! Cart commands, checkout and the profile summary.

use anyhow::Result;
use dialoguer::Confirm;
use loja_commerce::cart::{AddOutcome, QuantityChange};
use loja_commerce::storefront::{CheckoutOutcome, Storefront};
use loja_commerce::ProductId;
use serde_json::json;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::render;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront().await?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { id } => add(&mut store, ProductId::new(id), ctx),
        CartCommand::Remove { id } => {
            let id = ProductId::new(id);
            if store.remove_from_cart(id) {
                ctx.output.success(&format!("Produto #{} removido", id));
            } else {
                ctx.output.warn(&format!("Produto #{} não está no carrinho", id));
            }
        }
        CartCommand::Inc { id } => change(&mut store, ProductId::new(id), 1, ctx),
        CartCommand::Dec { id } => change(&mut store, ProductId::new(id), -1, ctx),
        CartCommand::Clear { yes } => {
            if store.cart().is_empty() {
                ctx.output.info("O carrinho já está vazio");
            } else if yes || ctx.output.is_json() || confirm_clear()? {
                store.clear_cart();
                ctx.output.success("Carrinho esvaziado");
            } else {
                ctx.output.warn("Cancelado");
            }
        }
    }

    show(&store, ctx);
    Ok(())
}

fn add(store: &mut Storefront, id: ProductId, ctx: &Context) {
    match store.add_to_cart(id) {
        AddOutcome::Added { quantity } => {
            let name = store
                .cart()
                .line(id)
                .map(|line| line.name.clone())
                .unwrap_or_else(|| format!("#{}", id));
            ctx.output
                .success(&format!("{} adicionado ({} no carrinho)", name, quantity));
        }
        AddOutcome::UnknownProduct => {
            ctx.output.warn(&format!("Produto #{} não encontrado", id));
        }
    }
}

fn change(store: &mut Storefront, id: ProductId, delta: i64, ctx: &Context) {
    match store.change_quantity(id, delta) {
        QuantityChange::Updated(quantity) => {
            ctx.output
                .success(&format!("Produto #{}: quantidade {}", id, quantity));
        }
        QuantityChange::Removed => ctx.output.success(&format!("Produto #{} removido", id)),
        QuantityChange::NotInCart => {
            ctx.output.warn(&format!("Produto #{} não está no carrinho", id));
        }
    }
}

fn confirm_clear() -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt("Esvaziar o carrinho?")
        .default(false)
        .interact()?)
}

fn show(store: &Storefront, ctx: &Context) {
    let view = store.cart_view();
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "badge_count": store.cart().item_count(),
            "cart": view,
        }));
        return;
    }

    ctx.output.header(&format!("Carrinho ({})", store.cart().item_count()));
    render::cart(&ctx.output, &view);
}

/// Run the checkout command.
pub async fn run_checkout(ctx: &Context) -> Result<()> {
    let store = ctx.open_storefront().await?;
    let outcome = store.checkout();

    if ctx.output.is_json() {
        ctx.output.json(&outcome);
        return Ok(());
    }

    match outcome {
        CheckoutOutcome::Unavailable { message } => ctx.output.warn(message),
    }
    Ok(())
}

/// Run the profile command.
pub async fn run_profile(ctx: &Context) -> Result<()> {
    let store = ctx.open_storefront().await?;
    let summary = store.profile_summary();

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    ctx.output.header("Meu perfil");
    ctx.output.kv("País", store.country().label());
    ctx.output.kv("Tema", store.theme().as_str());
    ctx.output.line("");
    render::profile(&ctx.output, &summary);
    Ok(())
}
