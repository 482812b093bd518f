//! End-to-end storefront behavior over real storage backends.

use loja_commerce::prelude::*;
use loja_commerce::repository::{CART_KEY, COUNTRY_KEY, RATES_KEY};
use loja_commerce::search::paginate;

fn sample_catalog() -> Catalog {
    let json = r#"[
        {"id": 1, "nome": "Teclado Mecânico", "categoria": "Periféricos", "preco": 100, "imagem": "https://cdn.loja/teclado.jpg"},
        {"id": 2, "nome": "Mouse Gamer", "categoria": "Periféricos", "preco": 50, "desconto": 0.5},
        {"id": 3, "nome": "Fone Bluetooth", "categoria": "Áudio", "preco": 300, "desconto": 0.1,
         "descontoDuracao": "Até domingo", "especificacoes": {"bateria": "30h", "conexao": "Bluetooth 5.3"}},
        {"id": 4, "nome": "Caixa de Som", "categoria": "Áudio", "preco": 450, "desconto": 1.5},
        {"id": "cinco", "nome": "Registro quebrado"}
    ]"#.as_bytes();
    Catalog::new(loja_commerce::catalog::parse_catalog(json).unwrap())
}

fn numbered_catalog(count: i64) -> Catalog {
    Catalog::new(
        (1..=count)
            .map(|i| Product::new(i, format!("Item {}", i), "Geral", i as f64))
            .collect(),
    )
}

#[test]
fn bad_records_are_skipped() {
    let catalog = sample_catalog();
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.promotions().len(), 2);
}

#[test]
fn repeated_adds_accumulate_quantity() {
    let cache = Cache::in_memory();
    let mut store = Storefront::with_cache(sample_catalog(), &cache, CurrencyConverter::new());

    for expected in 1..=5 {
        assert_eq!(
            store.add_to_cart(ProductId::new(3)),
            AddOutcome::Added { quantity: expected }
        );
    }
    assert_eq!(store.cart().len(), 1);
    assert_eq!(KvCartRepository::new(cache).load().item_count(), 5);
}

#[test]
fn add_order_does_not_change_totals() {
    let forward = {
        let mut cart = Cart::new();
        let catalog = sample_catalog();
        for id in [1, 2, 3, 2] {
            cart.add_product(catalog.find(ProductId::new(id)).unwrap());
        }
        cart
    };
    let backward = {
        let mut cart = Cart::new();
        let catalog = sample_catalog();
        for id in [2, 3, 2, 1] {
            cart.add_product(catalog.find(ProductId::new(id)).unwrap());
        }
        cart
    };

    assert_eq!(forward.total(), backward.total());
    assert_eq!(forward.item_count(), backward.item_count());
}

#[test]
fn mixed_discount_cart_totals() {
    let cache = Cache::in_memory();
    let mut store = Storefront::with_cache(sample_catalog(), &cache, CurrencyConverter::new());
    store.add_to_cart(ProductId::new(1));
    store.add_to_cart(ProductId::new(1));
    store.add_to_cart(ProductId::new(2));

    let pricing = store.cart().pricing();
    assert_eq!(pricing.total, Money::new(22500, Currency::BRL));
    assert_eq!(pricing.item_count, 3);
    assert_eq!(store.cart_view().total().to_string(), "R$ 225,00");
}

#[test]
fn sub_cent_lines_round_once_at_the_total() {
    let catalog = Catalog::new(
        (1..=4)
            .map(|i| Product::new(i, format!("Adesivo {}", i), "Brindes", 0.125))
            .collect(),
    );
    let cache = Cache::in_memory();
    let mut store = Storefront::with_cache(catalog, &cache, CurrencyConverter::new());
    for id in 1..=4 {
        store.add_to_cart(ProductId::new(id));
    }

    assert_eq!(store.cart().total(), Money::new(50, Currency::BRL));
    assert_eq!(store.cart_view().total().to_string(), "R$ 0,50");
    assert_eq!(store.profile_summary().total.to_string(), "R$ 0,50");
}

#[test]
fn out_of_range_discount_is_ignored() {
    let catalog = sample_catalog();
    let speaker = catalog.find(ProductId::new(4)).unwrap();
    assert!(!speaker.has_discount());
    assert_eq!(speaker.discounted_price(), 450.0);
}

#[test]
fn removing_missing_line_changes_nothing() {
    let cache = Cache::in_memory();
    let mut store = Storefront::with_cache(sample_catalog(), &cache, CurrencyConverter::new());
    store.add_to_cart(ProductId::new(1));
    let before = cache.get_raw(CART_KEY).unwrap();

    assert!(!store.remove_from_cart(ProductId::new(99)));
    assert_eq!(
        store.change_quantity(ProductId::new(99), 1),
        QuantityChange::NotInCart
    );
    assert_eq!(cache.get_raw(CART_KEY).unwrap(), before);
}

#[test]
fn decrement_to_zero_removes_line() {
    let cache = Cache::in_memory();
    let mut store = Storefront::with_cache(sample_catalog(), &cache, CurrencyConverter::new());
    store.add_to_cart(ProductId::new(2));

    assert_eq!(store.change_quantity(ProductId::new(2), -1), QuantityChange::Removed);
    assert!(!store.cart().contains(ProductId::new(2)));
    assert!(store.cart_view().is_empty());
}

#[test]
fn corrupted_storage_falls_back_to_defaults() {
    let cache = Cache::in_memory();
    cache.set_raw(CART_KEY, b"[{\"id\": 1, \"qtd\": \"many\"").unwrap();
    cache.set_raw(COUNTRY_KEY, b"mars").unwrap();
    cache.set_raw(RATES_KEY, b"{\"timestamp\": \"yesterday\"}").unwrap();

    let store = Storefront::with_cache(sample_catalog(), &cache, CurrencyConverter::new());
    assert!(store.cart().is_empty());
    assert_eq!(store.country(), Country::Br);
    assert!(KvRateCache::new(cache).load().is_none());
}

#[test]
fn filtering_twice_is_the_same_as_once() {
    let catalog = sample_catalog();
    let filter = ProductFilter::from_inputs("  FONE ", "Áudio", "100", "400");

    let once = filter.apply(catalog.products());
    let twice = filter.apply(&once);
    assert_eq!(once, twice);
    assert_eq!(once.len(), 1);
    assert_eq!(once[0].id, ProductId::new(3));
}

#[test]
fn price_filter_uses_list_price() {
    let catalog = sample_catalog();
    let filter = ProductFilter::from_inputs("", "Todas", "", "40");
    // The mouse costs 25 after discount but lists at 50.
    assert!(filter.apply(catalog.products()).is_empty());
}

#[test]
fn pages_cover_every_result_exactly_once() {
    for count in [0, 1, 9, 10, 11, 25, 30] {
        let catalog = numbered_catalog(count);
        let products = catalog.products();
        let first = paginate(products, 1, PAGE_SIZE);

        let mut seen = Vec::new();
        for page in 1..=first.pagination.total_pages {
            let slice = paginate(products, page, PAGE_SIZE);
            assert!(slice.items.len() <= PAGE_SIZE);
            seen.extend(slice.items.into_iter().map(|p| p.id));
        }

        let expected: Vec<ProductId> = products.iter().map(|p| p.id).collect();
        assert_eq!(seen, expected, "count {}", count);
    }
}

#[test]
fn pagination_window_follows_current_page() {
    let mut store = Storefront::with_cache(numbered_catalog(95), &Cache::in_memory(), CurrencyConverter::new());

    store.go_to_page(6);
    let view = store.catalog_view();
    assert_eq!(view.page_numbers, vec![4, 5, 6, 7, 8]);
    assert_eq!(view.pagination.prev_page(), 5);
    assert_eq!(view.pagination.next_page(), 7);

    store.go_to_page(10);
    let view = store.catalog_view();
    assert_eq!(view.page_numbers, vec![8, 9, 10]);
    assert_eq!(view.pagination.next_page(), 10);
}

#[test]
fn country_choice_changes_displayed_currency() {
    let cache = Cache::in_memory();
    let mut store = Storefront::with_cache(sample_catalog(), &cache, CurrencyConverter::new());
    store.set_country(Country::Us);

    let price = store.converter().format_price(100.0, store.country());
    assert_eq!(price.symbol, "$");
    assert_eq!(price.amount, "20.00");

    let reopened = Storefront::with_cache(sample_catalog(), &cache, CurrencyConverter::new());
    assert_eq!(reopened.country(), Country::Us);
}

#[test]
fn file_backed_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let cache = Cache::open(dir.path()).unwrap();
        let mut store = Storefront::with_cache(sample_catalog(), &cache, CurrencyConverter::new());
        store.add_to_cart(ProductId::new(3));
        store.add_to_cart(ProductId::new(3));
        store.set_theme(Theme::new("verde"));
    }

    let cache = Cache::open(dir.path()).unwrap();
    let store = Storefront::with_cache(sample_catalog(), &cache, CurrencyConverter::new());
    assert_eq!(store.cart().item_count(), 2);
    assert_eq!(store.theme().as_str(), "verde");
    assert_eq!(
        cache.get_raw(loja_commerce::repository::THEME_KEY).unwrap(),
        Some(b"verde".to_vec())
    );
}

#[test]
fn product_detail_orders_specifications() {
    let store = Storefront::with_cache(sample_catalog(), &Cache::in_memory(), CurrencyConverter::new());

    let ProductDetailView::Found(detail) = store.product_detail("3") else {
        panic!("expected product 3");
    };
    assert_eq!(detail.discount_duration.as_deref(), Some("Até domingo"));
    let labels: Vec<&str> = detail.specifications.iter().map(|s| s.label.as_str()).collect();
    assert!(labels.contains(&"Bateria"));
    assert!(labels.contains(&"Conexao"));
}
