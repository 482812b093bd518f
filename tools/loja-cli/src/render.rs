//! Terminal rendering of storefront views.

use console::style;
use loja_commerce::storefront::{
    CartPanelView, CatalogView, PriceView, ProductDetailView, ProfileCartView, PromoItem,
    StorefrontView,
};

use crate::output::{badge, pad, price, struck, truncate, Output};

const NAME_WIDTH: usize = 32;
const CATEGORY_WIDTH: usize = 14;

/// Country, theme and cart badge.
pub fn status_bar(out: &Output, view: &StorefrontView) {
    out.line(&format!(
        "{} {}   {} {}   {} {}   {} {}",
        style("País:").dim(),
        view.country.label(),
        style("Tema:").dim(),
        view.theme,
        style("Carrinho:").dim(),
        style(view.badge_count).bold(),
        style("Câmbio:").dim(),
        view.rate_status,
    ));
}

/// The product grid with its results counter and page buttons.
pub fn catalog(out: &Output, view: &CatalogView) {
    out.line(&style(&view.results_label).dim().to_string());

    if let Some(message) = view.empty_message {
        out.line("");
        out.line(message);
        return;
    }

    for card in &view.cards {
        let image = if card.has_real_image { " " } else { "▫" };
        let discount = card
            .discount_badge
            .as_deref()
            .map(|b| badge(&pad(b, 5)))
            .unwrap_or_else(|| pad("", 5));

        out.line(&format!(
            "  {} {} {}  {}  {}  {}",
            style(pad(&format!("#{}", card.id), 5)).dim(),
            image,
            pad(&truncate(&card.name, NAME_WIDTH), NAME_WIDTH),
            style(pad(&truncate(&card.category, CATEGORY_WIDTH), CATEGORY_WIDTH)).cyan(),
            discount,
            price_text(&card.price),
        ));
    }

    if !view.page_numbers.is_empty() {
        out.line("");
        out.line(&pagination(view));
    }
}

/// `« 1 [2] 3 »`
fn pagination(view: &CatalogView) -> String {
    let current = view.pagination.page;
    let buttons: Vec<String> = view
        .page_numbers
        .iter()
        .map(|&n| {
            if n == current {
                style(format!("[{}]", n)).bold().to_string()
            } else {
                n.to_string()
            }
        })
        .collect();

    format!(
        "  « {}  {}  {} »   {}",
        view.pagination.prev_page(),
        buttons.join(" "),
        view.pagination.next_page(),
        style(format!("página {} de {}", current, view.pagination.total_pages)).dim(),
    )
}

fn price_text(view: &PriceView) -> String {
    match &view.original {
        Some(original) => format!("{} {}", struck(&original.to_string()), price(&view.current.to_string())),
        None => price(&view.current.to_string()),
    }
}

/// The cart panel.
pub fn cart(out: &Output, view: &CartPanelView) {
    match view {
        CartPanelView::Empty {
            title,
            subtitle,
            total,
        } => {
            out.line(&style(title).bold().to_string());
            out.line(&style(subtitle).dim().to_string());
            out.line("");
            out.line(&format!("Total: {}", price(&total.to_string())));
        }
        CartPanelView::Items { lines, total } => {
            for line in lines {
                let unit = line
                    .original_unit_price
                    .as_ref()
                    .map(|p| format!("{} ", struck(&p.to_string())))
                    .unwrap_or_default();
                out.line(&format!(
                    "  {} {}  x{:<3} {}{}",
                    style(pad(&format!("#{}", line.id), 5)).dim(),
                    pad(&truncate(&line.name, NAME_WIDTH), NAME_WIDTH),
                    line.quantity,
                    unit,
                    price(&line.line_total.to_string()),
                ));
            }
            out.line("");
            out.line(&format!("Total: {}", price(&total.to_string())));
        }
    }
}

/// The promotions strip.
pub fn promotions(out: &Output, items: &[PromoItem]) {
    if items.is_empty() {
        out.line(&style("Nenhuma promoção no momento.").dim().to_string());
        return;
    }
    for item in items {
        out.line(&format!(
            "  {} {}  {}  {}",
            style(pad(&format!("#{}", item.id), 5)).dim(),
            pad(&truncate(&item.name, NAME_WIDTH), NAME_WIDTH),
            badge(&pad(&item.discount_badge, 5)),
            price_text(&item.price),
        ));
    }
}

/// The product detail page.
pub fn product_detail(out: &Output, view: &ProductDetailView) {
    let detail = match view {
        ProductDetailView::NotFound { message } => {
            out.line(message);
            return;
        }
        ProductDetailView::Found(detail) => detail,
    };

    out.header(&detail.name);
    out.kv("Categoria", &detail.category);
    if let Some(b) = &detail.discount_badge {
        out.kv("Desconto", &badge(b));
    }
    if let Some(duration) = &detail.discount_duration {
        out.kv("Válido", duration);
    }
    out.kv("Preço", &price_text(&detail.price));
    if let Some(image) = detail.image.as_deref().filter(|_| detail.has_real_image) {
        out.kv("Imagem", image);
    }

    if !detail.description.is_empty() {
        out.line("");
        out.line(&detail.description);
    }

    out.line("");
    out.line(&style("Especificações").bold().to_string());
    match detail.specifications_message {
        Some(message) => out.line(&style(message).dim().to_string()),
        None => {
            for spec in &detail.specifications {
                out.kv(&spec.label, &spec.value);
            }
        }
    }
}

/// The profile page's cart listing.
pub fn profile(out: &Output, view: &ProfileCartView) {
    if view.lines.is_empty() {
        out.line(&style("Carrinho vazio.").dim().to_string());
    }
    for line in &view.lines {
        out.list_item(&format!("{} x{} - {}", line.name, line.quantity, line.unit_price));
    }
    out.line("");
    out.line(&format!("Total: {}", price(&view.total.to_string())));
}
