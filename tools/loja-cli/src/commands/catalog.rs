//! Browsing commands: catalog, promotions and product detail.

use anyhow::Result;
use loja_commerce::search::ProductFilter;

use super::{CatalogArgs, ProductArgs};
use crate::context::Context;
use crate::render;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront().await?;

    store.set_filter(ProductFilter::from_inputs(
        &args.search,
        &args.category,
        &args.min,
        &args.max,
    ));
    let page = store.go_to_page(args.page);
    if page != args.page {
        ctx.output
            .debug(&format!("Page {} is out of range, showing page {}", args.page, page));
    }

    let view = store.view();
    if ctx.output.is_json() {
        ctx.output.json(&view);
        return Ok(());
    }

    ctx.output.header("LojaTech");
    render::status_bar(&ctx.output, &view);
    ctx.output.line(&format!("Categorias: {}", view.categories.join(", ")));
    ctx.output.line("");
    render::catalog(&ctx.output, &view.catalog);

    Ok(())
}

/// Run the promos command.
pub async fn run_promos(ctx: &Context) -> Result<()> {
    let store = ctx.open_storefront().await?;
    let view = store.view();

    if ctx.output.is_json() {
        ctx.output.json(&view.promotions);
        return Ok(());
    }

    ctx.output.header("Promoções");
    render::promotions(&ctx.output, &view.promotions);
    Ok(())
}

/// Run the product command.
pub async fn run_product(args: ProductArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_storefront().await?;
    let detail = store.product_detail(&args.id);

    if ctx.output.is_json() {
        ctx.output.json(&detail);
        return Ok(());
    }

    render::product_detail(&ctx.output, &detail);
    Ok(())
}
