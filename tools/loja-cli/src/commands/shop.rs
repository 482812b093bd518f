//! Interactive storefront session.

use anyhow::{bail, Result};
use dialoguer::{Confirm, Input, Select};
use loja_commerce::cart::{AddOutcome, QuantityChange};
use loja_commerce::currency::Country;
use loja_commerce::repository::Theme;
use loja_commerce::search::{CategoryFilter, ProductFilter};
use loja_commerce::storefront::{CheckoutOutcome, Storefront};
use loja_commerce::ProductId;

use crate::context::Context;
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Filter,
    ClearFilters,
    NextPage,
    PrevPage,
    GoToPage,
    Details,
    Add,
    Cart,
    Promotions,
    Country,
    Theme,
    Checkout,
    Quit,
}

const MENU: [(Action, &str); 13] = [
    (Action::Filter, "Buscar / filtrar"),
    (Action::ClearFilters, "Limpar filtros"),
    (Action::NextPage, "Próxima página »"),
    (Action::PrevPage, "« Página anterior"),
    (Action::GoToPage, "Ir para a página..."),
    (Action::Details, "Ver produto"),
    (Action::Add, "Adicionar ao carrinho"),
    (Action::Cart, "Carrinho"),
    (Action::Promotions, "Promoções"),
    (Action::Country, "País / moeda"),
    (Action::Theme, "Tema"),
    (Action::Checkout, "Finalizar compra"),
    (Action::Quit, "Sair"),
];

/// Run the shop command.
pub async fn run(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        bail!("The interactive shop needs a terminal; use the other commands with --json");
    }

    let mut store = ctx.open_storefront().await?;
    let labels: Vec<&str> = MENU.iter().map(|(_, label)| *label).collect();

    loop {
        store.reload_cart();
        let view = store.view();

        ctx.output.header("LojaTech");
        render::status_bar(&ctx.output, &view);
        ctx.output.line("");
        render::catalog(&ctx.output, &view.catalog);
        ctx.output.line("");

        let choice = Select::new()
            .with_prompt("O que deseja fazer?")
            .items(&labels)
            .default(0)
            .interact()?;

        match MENU[choice].0 {
            Action::Filter => filter(&mut store, &view.categories)?,
            Action::ClearFilters => store.clear_filters(),
            Action::NextPage => {
                store.go_to_page(view.catalog.pagination.next_page());
            }
            Action::PrevPage => {
                store.go_to_page(view.catalog.pagination.prev_page());
            }
            Action::GoToPage => {
                let page: usize = Input::new().with_prompt("Página").interact_text()?;
                store.go_to_page(page);
            }
            Action::Details => {
                let raw: String = Input::new().with_prompt("Id do produto").interact_text()?;
                render::product_detail(&ctx.output, &store.product_detail(&raw));
                pause()?;
            }
            Action::Add => {
                let id: i64 = Input::new().with_prompt("Id do produto").interact_text()?;
                match store.add_to_cart(ProductId::new(id)) {
                    AddOutcome::Added { quantity } => ctx
                        .output
                        .success(&format!("Adicionado ({} no carrinho)", quantity)),
                    AddOutcome::UnknownProduct => ctx.output.warn("Produto não encontrado"),
                }
            }
            Action::Cart => cart(&mut store, ctx)?,
            Action::Promotions => {
                ctx.output.header("Promoções");
                render::promotions(&ctx.output, &view.promotions);
                pause()?;
            }
            Action::Country => {
                let items: Vec<String> = Country::ALL
                    .iter()
                    .map(|c| format!("{} ({})", c.label(), c.currency().code()))
                    .collect();
                let current = Country::ALL
                    .iter()
                    .position(|c| *c == store.country())
                    .unwrap_or(0);
                let selected = Select::new()
                    .with_prompt("País")
                    .items(&items)
                    .default(current)
                    .interact()?;
                store.set_country(Country::ALL[selected]);
            }
            Action::Theme => {
                let name: String = Input::new()
                    .with_prompt("Tema")
                    .with_initial_text(store.theme().as_str())
                    .interact_text()?;
                store.set_theme(Theme::new(name));
            }
            Action::Checkout => match store.checkout() {
                CheckoutOutcome::Unavailable { message } => {
                    ctx.output.warn(message);
                    pause()?;
                }
            },
            Action::Quit => break,
        }
    }

    Ok(())
}

fn filter(store: &mut Storefront, categories: &[String]) -> Result<()> {
    let current = store.filter().clone();

    let text: String = Input::new()
        .with_prompt("Buscar")
        .with_initial_text(current.text.as_str())
        .allow_empty(true)
        .interact_text()?;

    let selected_category = categories
        .iter()
        .position(|c| c == current.category.label())
        .unwrap_or(0);
    let category = Select::new()
        .with_prompt("Categoria")
        .items(categories)
        .default(selected_category)
        .interact()?;

    let min: String = Input::new()
        .with_prompt("Preço mínimo")
        .allow_empty(true)
        .interact_text()?;
    let max: String = Input::new()
        .with_prompt("Preço máximo")
        .allow_empty(true)
        .interact_text()?;

    let category = categories
        .get(category)
        .map(String::as_str)
        .unwrap_or(CategoryFilter::ALL_LABEL);
    store.set_filter(ProductFilter::from_inputs(&text, category, &min, &max));
    Ok(())
}

fn cart(store: &mut Storefront, ctx: &Context) -> Result<()> {
    loop {
        ctx.output
            .header(&format!("Carrinho ({})", store.cart().item_count()));
        render::cart(&ctx.output, &store.cart_view());
        ctx.output.line("");

        if store.cart().is_empty() {
            pause()?;
            return Ok(());
        }

        let actions = ["+1", "-1", "Remover", "Esvaziar", "Voltar"];
        let choice = Select::new()
            .with_prompt("Carrinho")
            .items(&actions)
            .default(4)
            .interact()?;
        if choice == 4 {
            return Ok(());
        }
        if choice == 3 {
            if Confirm::new()
                .with_prompt("Esvaziar o carrinho?")
                .default(false)
                .interact()?
            {
                store.clear_cart();
            }
            continue;
        }

        let items: Vec<String> = store
            .cart()
            .lines()
            .iter()
            .map(|line| format!("#{} {} (x{})", line.id, line.name, line.quantity))
            .collect();
        let line = Select::new().with_prompt("Produto").items(&items).interact()?;
        let id = store.cart().lines()[line].id;

        match choice {
            0 | 1 => {
                let delta = if choice == 0 { 1 } else { -1 };
                if store.change_quantity(id, delta) == QuantityChange::Removed {
                    ctx.output.info("Item removido");
                }
            }
            _ => {
                store.remove_from_cart(id);
            }
        }
    }
}

fn pause() -> Result<()> {
    let _: String = Input::new()
        .with_prompt("Enter para continuar")
        .allow_empty(true)
        .interact_text()?;
    Ok(())
}
