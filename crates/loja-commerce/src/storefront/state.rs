//! Storefront session state.

use loja_cache::Cache;

use crate::cart::{AddOutcome, Cart, CartStore, CartUpdate, QuantityChange};
use crate::catalog::{Catalog, Product};
use crate::currency::{Country, CurrencyConverter, RateSource, RateStatus};
use crate::ids::ProductId;
use crate::repository::{
    CartRepository, KvCartRepository, KvPreferences, PreferenceRepository, RateCacheRepository,
    Theme,
};
use crate::search::{paginate, results_label, Pagination, ProductFilter, PAGE_SIZE};
use crate::storefront::view::{
    discount_badge, CartLineView, CartPanelView, CatalogView, CheckoutOutcome, PriceView,
    ProductCard, ProductDetail, ProductDetailView, ProfileCartLine, ProfileCartView, PromoItem,
    SpecificationView, StorefrontView, CHECKOUT_UNAVAILABLE_MESSAGE, EMPTY_CART_SUBTITLE,
    EMPTY_CART_TITLE, NO_RESULTS_MESSAGE, NO_SPECIFICATIONS_MESSAGE, PRODUCT_NOT_FOUND_MESSAGE,
};

/// One shopper's view of the store.
///
/// Holds the loaded catalog, the browse state (filter and page), the
/// selected country and theme, and a copy of the cart that is replaced after
/// every cart mutation. Every mutation is persisted before it returns, so a
/// view built afterwards always reflects stored state.
pub struct Storefront {
    catalog: Catalog,
    cart_store: CartStore<Box<dyn CartRepository>>,
    cart: Cart,
    preferences: Box<dyn PreferenceRepository>,
    converter: CurrencyConverter,
    country: Country,
    theme: Theme,
    filter: ProductFilter,
    page: usize,
}

impl Storefront {
    /// Start a session, reading the stored cart, country and theme.
    pub fn new(
        catalog: Catalog,
        cart_repo: impl CartRepository + 'static,
        preferences: impl PreferenceRepository + 'static,
        converter: CurrencyConverter,
    ) -> Self {
        let cart_store = CartStore::new(Box::new(cart_repo) as Box<dyn CartRepository>);
        let cart = cart_store.load();
        let country = preferences.country();
        let theme = preferences.theme();

        tracing::debug!(
            products = catalog.len(),
            cart_lines = cart.len(),
            %country,
            %theme,
            "storefront session started"
        );

        Self {
            catalog,
            cart_store,
            cart,
            preferences: Box::new(preferences),
            converter,
            country,
            theme,
            filter: ProductFilter::default(),
            page: 1,
        }
    }

    /// Start a session over a key-value cache using the standard keys.
    pub fn with_cache(catalog: Catalog, cache: &Cache, converter: CurrencyConverter) -> Self {
        Self::new(
            catalog,
            KvCartRepository::new(cache.clone()),
            KvPreferences::new(cache.clone()),
            converter,
        )
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn converter(&self) -> &CurrencyConverter {
        &self.converter
    }

    pub fn country(&self) -> Country {
        self.country
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    /// Current catalog page (1-indexed).
    pub fn page(&self) -> usize {
        self.page
    }

    /// Re-read the cart from storage, picking up writes from elsewhere.
    pub fn reload_cart(&mut self) {
        self.cart = self.cart_store.load();
    }

    /// Refresh exchange rates. Never fails; see [`CurrencyConverter::refresh`].
    pub async fn refresh_rates(
        &mut self,
        cache: &dyn RateCacheRepository,
        source: &dyn RateSource,
    ) -> RateStatus {
        self.converter.refresh(cache, source).await
    }

    /// Replace the browse filter. Returns to page 1 only when the filter
    /// actually changed.
    pub fn set_filter(&mut self, filter: ProductFilter) -> bool {
        if filter == self.filter {
            return false;
        }
        tracing::debug!(text = %filter.text, category = filter.category.label(), "filter changed");
        self.filter = filter;
        self.page = 1;
        true
    }

    /// Back to the unfiltered first page.
    pub fn clear_filters(&mut self) {
        self.filter = ProductFilter::default();
        self.page = 1;
    }

    /// Move to `page`, clamped to the pages the current filter produces.
    /// Returns the page actually selected.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        let total = self.filtered_products().len();
        self.page = Pagination::new(self.page, PAGE_SIZE, total).clamp_page(page);
        self.page
    }

    /// Add one unit of a product to the cart.
    pub fn add_to_cart(&mut self, id: ProductId) -> AddOutcome {
        let update = self.cart_store.add(&self.catalog, id);
        self.apply(update)
    }

    /// Remove a product's line from the cart.
    pub fn remove_from_cart(&mut self, id: ProductId) -> bool {
        let update = self.cart_store.remove(id);
        self.apply(update)
    }

    /// Adjust a cart line by `delta` units.
    pub fn change_quantity(&mut self, id: ProductId, delta: i64) -> QuantityChange {
        let update = self.cart_store.change_quantity(id, delta);
        self.apply(update)
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart = self.cart_store.clear();
    }

    /// Select and persist the shopper's country.
    pub fn set_country(&mut self, country: Country) {
        self.country = country;
        if let Err(e) = self.preferences.set_country(country) {
            tracing::warn!(error = %e, %country, "failed to save country");
        }
    }

    /// Select and persist the theme.
    pub fn set_theme(&mut self, theme: Theme) {
        if let Err(e) = self.preferences.set_theme(&theme) {
            tracing::warn!(error = %e, %theme, "failed to save theme");
        }
        self.theme = theme;
    }

    /// Pressing checkout. Leaves the cart untouched.
    pub fn checkout(&self) -> CheckoutOutcome {
        tracing::info!(lines = self.cart.len(), "checkout requested");
        CheckoutOutcome::Unavailable {
            message: CHECKOUT_UNAVAILABLE_MESSAGE,
        }
    }

    /// Everything needed to draw the store page.
    pub fn view(&self) -> StorefrontView {
        StorefrontView {
            country: self.country,
            theme: self.theme.to_string(),
            badge_count: self.cart.item_count(),
            categories: self.catalog.categories(),
            catalog: self.catalog_view(),
            cart: self.cart_view(),
            promotions: self.promotions(),
            rate_status: self.converter.status(),
        }
    }

    /// The product grid for the current filter and page.
    pub fn catalog_view(&self) -> CatalogView {
        let filtered = self.filtered_products();
        let page = paginate(&filtered, self.page, PAGE_SIZE);

        let page_numbers = if page.pagination.shows_controls() {
            page.pagination.page_numbers()
        } else {
            Vec::new()
        };

        CatalogView {
            results_label: results_label(filtered.len()),
            cards: page.items.iter().map(|p| self.card(p)).collect(),
            pagination: page.pagination,
            page_numbers,
            empty_message: filtered.is_empty().then_some(NO_RESULTS_MESSAGE),
        }
    }

    /// The cart panel.
    pub fn cart_view(&self) -> CartPanelView {
        let pricing = self.cart.pricing();
        let total = self
            .converter
            .format_price(pricing.total_amount(), self.country);

        if self.cart.is_empty() {
            return CartPanelView::Empty {
                title: EMPTY_CART_TITLE,
                subtitle: EMPTY_CART_SUBTITLE,
                total,
            };
        }

        let lines = pricing
            .lines
            .iter()
            .map(|line| CartLineView {
                id: line.id,
                name: line.name.clone(),
                quantity: line.quantity,
                image: line.image.clone(),
                has_real_image: line.has_real_image,
                original_unit_price: line
                    .has_discount
                    .then(|| self.converter.format_price(line.unit_amount, self.country)),
                line_total: self.converter.format_price(line.line_amount(), self.country),
            })
            .collect();

        CartPanelView::Items { lines, total }
    }

    /// The compact cart listing shown on the profile page.
    pub fn profile_summary(&self) -> ProfileCartView {
        let pricing = self.cart.pricing();
        ProfileCartView {
            lines: pricing
                .lines
                .iter()
                .map(|line| ProfileCartLine {
                    name: line.name.clone(),
                    quantity: line.quantity,
                    unit_price: self
                        .converter
                        .format_price(line.discounted_unit_amount, self.country),
                })
                .collect(),
            total: self
                .converter
                .format_price(pricing.total_amount(), self.country),
        }
    }

    /// Detail page for a raw query-string id.
    pub fn product_detail(&self, raw_id: &str) -> ProductDetailView {
        // A zero id reads as "no id" on the detail page.
        let product = ProductId::from_query(raw_id)
            .filter(|id| id.get() != 0)
            .and_then(|id| self.catalog.find(id));
        let Some(product) = product else {
            tracing::debug!(raw_id, "product detail requested for unknown id");
            return ProductDetailView::NotFound {
                message: PRODUCT_NOT_FOUND_MESSAGE,
            };
        };

        let specifications: Vec<SpecificationView> = product
            .ordered_specifications()
            .into_iter()
            .map(|(label, value)| SpecificationView { label, value })
            .collect();
        let specifications_message = specifications
            .is_empty()
            .then_some(NO_SPECIFICATIONS_MESSAGE);

        ProductDetailView::Found(Box::new(ProductDetail {
            id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            has_real_image: product.has_real_image(),
            price: self.price_view(product),
            discount_badge: product
                .has_discount()
                .then(|| discount_badge(product.discount_percent())),
            discount_duration: product
                .discount_duration
                .clone()
                .filter(|_| product.has_discount()),
            description: product.description.clone().unwrap_or_default(),
            specifications,
            specifications_message,
        }))
    }

    fn promotions(&self) -> Vec<PromoItem> {
        self.catalog
            .promotions()
            .into_iter()
            .map(|product| PromoItem {
                id: product.id,
                name: product.name.clone(),
                discount_badge: discount_badge(product.discount_percent()),
                price: self.price_view(product),
            })
            .collect()
    }

    fn card(&self, product: &Product) -> ProductCard {
        ProductCard {
            id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            has_real_image: product.has_real_image(),
            discount_badge: product
                .has_discount()
                .then(|| discount_badge(product.discount_percent())),
            price: self.price_view(product),
        }
    }

    fn price_view(&self, product: &Product) -> PriceView {
        PriceView {
            original: product
                .has_discount()
                .then(|| self.converter.format_price(product.price, self.country)),
            current: self
                .converter
                .format_price(product.discounted_price(), self.country),
        }
    }

    fn filtered_products(&self) -> Vec<Product> {
        self.filter.apply(self.catalog.products())
    }

    fn apply<T>(&mut self, update: CartUpdate<T>) -> T {
        self.cart = update.cart;
        update.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartLine;
    use crate::error::CommerceError;
    use crate::repository::CART_KEY;
    use crate::search::CategoryFilter;

    struct BrokenPreferences;

    impl PreferenceRepository for BrokenPreferences {
        fn country(&self) -> Country {
            Country::Br
        }

        fn set_country(&self, _country: Country) -> Result<(), CommerceError> {
            Err(CommerceError::StorageError("disabled".to_string()))
        }

        fn theme(&self) -> Theme {
            Theme::default()
        }

        fn set_theme(&self, _theme: &Theme) -> Result<(), CommerceError> {
            Err(CommerceError::StorageError("disabled".to_string()))
        }
    }

    fn catalog(count: i64) -> Catalog {
        Catalog::new(
            (1..=count)
                .map(|i| {
                    let category = if i % 2 == 0 { "Áudio" } else { "Periféricos" };
                    Product::new(i, format!("Produto {}", i), category, 10.0 * i as f64)
                })
                .collect(),
        )
    }

    fn storefront(catalog: Catalog) -> (Storefront, Cache) {
        let cache = Cache::in_memory();
        let store = Storefront::with_cache(catalog, &cache, CurrencyConverter::new());
        (store, cache)
    }

    #[test]
    fn test_initial_state() {
        let (store, _) = storefront(catalog(3));
        let view = store.view();

        assert_eq!(view.country, Country::Br);
        assert_eq!(view.theme, "roxo");
        assert_eq!(view.badge_count, 0);
        assert_eq!(view.categories, vec!["Todas", "Periféricos", "Áudio"]);
        assert_eq!(view.catalog.results_label, "3 produtos encontrados");
        assert!(view.catalog.page_numbers.is_empty());
        assert!(view.cart.is_empty());
        assert_eq!(view.rate_status, RateStatus::Fallback);
    }

    #[test]
    fn test_stored_state_is_loaded() {
        let cache = Cache::in_memory();
        cache.set_raw(crate::repository::COUNTRY_KEY, b"us").unwrap();
        cache
            .set(CART_KEY, &vec![CartLine::from_product(&Product::new(1, "A", "C", 5.0))])
            .unwrap();

        let store = Storefront::with_cache(catalog(1), &cache, CurrencyConverter::new());
        assert_eq!(store.country(), Country::Us);
        assert_eq!(store.view().badge_count, 1);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let (mut store, _) = storefront(catalog(25));
        assert_eq!(store.go_to_page(3), 3);

        assert!(!store.set_filter(ProductFilter::default()));
        assert_eq!(store.page(), 3);

        assert!(store.set_filter(ProductFilter::default().with_text("produto")));
        assert_eq!(store.page(), 1);
    }

    #[test]
    fn test_go_to_page_clamps() {
        let (mut store, _) = storefront(catalog(25));
        assert_eq!(store.go_to_page(99), 3);
        assert_eq!(store.go_to_page(0), 1);

        store.set_filter(ProductFilter::default().with_text("nada disso"));
        assert_eq!(store.go_to_page(2), 1);
    }

    #[test]
    fn test_catalog_view_pages() {
        let (mut store, _) = storefront(catalog(25));
        store.go_to_page(3);
        let view = store.catalog_view();

        assert_eq!(view.cards.len(), 5);
        assert_eq!(view.cards[0].name, "Produto 21");
        assert_eq!(view.page_numbers, vec![1, 2, 3]);
        assert_eq!(view.pagination.total_pages, 3);
        assert!(view.empty_message.is_none());
    }

    #[test]
    fn test_catalog_view_empty_message() {
        let (mut store, _) = storefront(catalog(4));
        store.set_filter(ProductFilter::default().with_category(CategoryFilter::parse("Jogos")));
        let view = store.catalog_view();

        assert!(view.cards.is_empty());
        assert_eq!(view.results_label, "0 produtos encontrados");
        assert_eq!(view.empty_message, Some(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn test_card_prices_in_selected_currency() {
        let products = vec![Product::new(1, "Fone", "Áudio", 100.0).with_discount(0.1)];
        let (mut store, _) = storefront(Catalog::new(products));
        store.set_country(Country::Us);

        let card = &store.catalog_view().cards[0];
        assert_eq!(card.discount_badge.as_deref(), Some("-10%"));
        assert_eq!(card.price.original.as_ref().unwrap().to_string(), "$ 20.00");
        assert_eq!(card.price.current.to_string(), "$ 18.00");
    }

    #[test]
    fn test_cart_mutations_update_view_and_storage() {
        let (mut store, cache) = storefront(catalog(3));

        assert_eq!(store.add_to_cart(ProductId::new(2)), AddOutcome::Added { quantity: 1 });
        assert_eq!(store.add_to_cart(ProductId::new(2)), AddOutcome::Added { quantity: 2 });
        assert_eq!(store.view().badge_count, 2);

        let stored = KvCartRepository::new(cache).load();
        assert_eq!(&stored, store.cart());

        assert_eq!(store.change_quantity(ProductId::new(2), -1), QuantityChange::Updated(1));
        assert!(store.remove_from_cart(ProductId::new(2)));
        assert!(store.cart_view().is_empty());
    }

    #[test]
    fn test_cart_panel_lines() {
        let products = vec![
            Product::new(1, "Teclado", "Periféricos", 100.0),
            Product::new(2, "Mouse", "Periféricos", 50.0).with_discount(0.5),
        ];
        let (mut store, _) = storefront(Catalog::new(products));
        store.add_to_cart(ProductId::new(1));
        store.add_to_cart(ProductId::new(1));
        store.add_to_cart(ProductId::new(2));

        let CartPanelView::Items { lines, total } = store.cart_view() else {
            panic!("expected cart lines");
        };
        assert_eq!(lines.len(), 2);
        assert!(lines[0].original_unit_price.is_none());
        assert_eq!(lines[1].original_unit_price.as_ref().unwrap().to_string(), "R$ 50,00");
        assert_eq!(lines[1].line_total.to_string(), "R$ 25,00");
        assert_eq!(total.to_string(), "R$ 225,00");
    }

    #[test]
    fn test_empty_cart_panel() {
        let (store, _) = storefront(catalog(1));
        match store.cart_view() {
            CartPanelView::Empty { title, subtitle, total } => {
                assert_eq!(title, EMPTY_CART_TITLE);
                assert_eq!(subtitle, EMPTY_CART_SUBTITLE);
                assert_eq!(total.to_string(), "R$ 0,00");
            }
            other => panic!("unexpected panel {:?}", other),
        }
    }

    #[test]
    fn test_product_detail_zero_id_is_not_found() {
        let products = vec![Product::new(0, "Brinde", "Acessórios", 0.0)];
        let (store, _) = storefront(Catalog::new(products));

        for raw in ["0", "00", "-0"] {
            assert_eq!(
                store.product_detail(raw),
                ProductDetailView::NotFound {
                    message: PRODUCT_NOT_FOUND_MESSAGE
                }
            );
        }
    }

    #[test]
    fn test_product_detail() {
        let products = vec![
            Product::new(7, "Monitor", "Monitores", 900.0)
                .with_discount(0.15)
                .with_spec("tela", "27 polegadas"),
            Product::new(8, "Cabo", "Acessórios", 20.0),
        ];
        let (store, _) = storefront(Catalog::new(products));

        let ProductDetailView::Found(detail) = store.product_detail("7") else {
            panic!("expected product");
        };
        assert_eq!(detail.discount_badge.as_deref(), Some("-15%"));
        assert_eq!(detail.specifications[0].label, "Tela");
        assert!(detail.specifications_message.is_none());

        let ProductDetailView::Found(detail) = store.product_detail("8") else {
            panic!("expected product");
        };
        assert_eq!(detail.specifications_message, Some(NO_SPECIFICATIONS_MESSAGE));

        for raw in ["", "abc", "99"] {
            assert_eq!(
                store.product_detail(raw),
                ProductDetailView::NotFound {
                    message: PRODUCT_NOT_FOUND_MESSAGE
                }
            );
        }
    }

    #[test]
    fn test_checkout_leaves_cart() {
        let (mut store, _) = storefront(catalog(1));
        store.add_to_cart(ProductId::new(1));

        assert_eq!(
            store.checkout(),
            CheckoutOutcome::Unavailable {
                message: CHECKOUT_UNAVAILABLE_MESSAGE
            }
        );
        assert_eq!(store.cart().item_count(), 1);
    }

    #[test]
    fn test_preference_save_failure_keeps_selection() {
        let store_cache = Cache::in_memory();
        let mut store = Storefront::new(
            catalog(1),
            KvCartRepository::new(store_cache),
            BrokenPreferences,
            CurrencyConverter::new(),
        );

        store.set_country(Country::Eu);
        store.set_theme(Theme::new("azul"));
        assert_eq!(store.country(), Country::Eu);
        assert_eq!(store.view().theme, "azul");
    }

    #[test]
    fn test_profile_summary() {
        let products = vec![Product::new(1, "Mouse", "Periféricos", 80.0).with_discount(0.25)];
        let (mut store, _) = storefront(Catalog::new(products));
        store.add_to_cart(ProductId::new(1));
        store.add_to_cart(ProductId::new(1));

        let summary = store.profile_summary();
        assert_eq!(summary.lines[0].quantity, 2);
        assert_eq!(summary.lines[0].unit_price.to_string(), "R$ 60,00");
        assert_eq!(summary.total.to_string(), "R$ 120,00");
    }
}
