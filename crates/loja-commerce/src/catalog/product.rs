//! Product type and its catalog record format.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::ProductId;

/// Specification keys shown first on the detail page, in no particular order
/// among themselves.
pub const PREFERRED_SPEC_KEYS: &[&str] = &[
    "marca",
    "modelo",
    "chipset",
    "memoria",
    "memória",
    "capacidade",
    "tamanho",
    "velocidade",
    "frequencia",
    "frequência",
    "interface",
    "conexao",
    "conexão",
    "socket",
    "consumo",
    "tdp",
    "cor",
    "peso",
    "dimensoes",
    "dimensões",
    "largura",
    "altura",
    "profundidade",
    "garantia",
];

/// Record keys that may carry how long a discount lasts.
pub const DISCOUNT_DURATION_KEYS: &[&str] = &[
    "descontoDuracao",
    "desconto_duracao",
    "descontoDuracão",
    "descontoDuration",
    "desconto_validade",
    "descontoValidade",
    "desconto_valid_until",
    "descontoUntil",
    "desconto_ate",
];

/// Record keys that are never treated as specifications.
const RESERVED_KEYS: &[&str] = &[
    "id",
    "nome",
    "categoria",
    "preco",
    "desconto",
    "imagem",
    "descricao",
    "descrição",
    "resumo",
    "especificacoes",
];

/// A product in the catalog. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "ProductRecord")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category name, matched exactly by the category filter.
    pub category: String,
    /// Unit price in the base currency.
    pub price: f64,
    /// Discount fraction as found in the record. Use [`Product::discount_rate`].
    pub discount: f64,
    /// Image URL.
    pub image: Option<String>,
    /// Long description, or the short summary when there is none.
    pub description: Option<String>,
    /// Free-form text describing how long the discount lasts.
    pub discount_duration: Option<String>,
    /// Technical specifications, keyed by their record name.
    pub specifications: BTreeMap<String, String>,
}

impl Product {
    /// Create a product with no image, description or specifications.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            category: category.into(),
            price,
            discount: 0.0,
            image: None,
            description: None,
            discount_duration: None,
            specifications: BTreeMap::new(),
        }
    }

    /// Set the discount fraction.
    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    /// Set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Add a specification.
    pub fn with_spec(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.specifications.insert(key.into(), value.into());
        self
    }

    /// The discount fraction actually applied: values outside `[0, 1)` count as none.
    pub fn discount_rate(&self) -> f64 {
        sanitize_discount(self.discount)
    }

    /// Whether the product is on sale.
    pub fn has_discount(&self) -> bool {
        self.discount_rate() > 0.0
    }

    /// Discount as a rounded percentage, as shown on the `-NN%` badge.
    pub fn discount_percent(&self) -> u32 {
        (self.discount_rate() * 100.0).round() as u32
    }

    /// Unit price after discount, in the base currency.
    pub fn discounted_price(&self) -> f64 {
        self.price * (1.0 - self.discount_rate())
    }

    /// Whether the image is a real picture rather than a missing or
    /// placeholder-service URL.
    pub fn has_real_image(&self) -> bool {
        match self.image.as_deref() {
            Some(url) if !url.trim().is_empty() => {
                !(url.contains("placeholder.com") || url.contains("?text="))
            }
            _ => false,
        }
    }

    /// Specifications as `(label, value)` pairs, preferred keys first.
    pub fn ordered_specifications(&self) -> Vec<(String, String)> {
        let mut specs: Vec<(&String, &String)> = self.specifications.iter().collect();
        specs.sort_by(|(a, _), (b, _)| compare_spec_keys(a, b));
        specs
            .into_iter()
            .map(|(key, value)| (humanize_key(key), value.clone()))
            .collect()
    }
}

/// Clamp a raw discount into the applied range.
pub(crate) fn sanitize_discount(raw: f64) -> f64 {
    if raw.is_finite() && (0.0..1.0).contains(&raw) {
        raw
    } else {
        0.0
    }
}

fn spec_priority(key: &str) -> u8 {
    let lower = key.to_lowercase();
    if PREFERRED_SPEC_KEYS.contains(&lower.as_str()) {
        1
    } else {
        2
    }
}

fn compare_spec_keys(a: &str, b: &str) -> Ordering {
    spec_priority(a)
        .cmp(&spec_priority(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// `memoria_ram` -> `Memoria Ram`.
fn humanize_key(key: &str) -> String {
    key.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a scalar record value the way it appears on screen. Nulls, empty
/// strings, objects and arrays have no rendering.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        }),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A product as it appears in the catalog file.
#[derive(Debug, Deserialize)]
struct ProductRecord {
    id: i64,
    nome: String,
    #[serde(default)]
    categoria: String,
    preco: f64,
    #[serde(default)]
    desconto: Option<f64>,
    #[serde(default)]
    imagem: Option<String>,
    #[serde(default)]
    descricao: Option<String>,
    #[serde(default)]
    resumo: Option<String>,
    #[serde(default)]
    especificacoes: Option<Value>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        let ProductRecord {
            id,
            nome,
            categoria,
            preco,
            desconto,
            imagem,
            descricao,
            resumo,
            especificacoes,
            mut extra,
        } = record;

        let accented_description = extra
            .remove("descrição")
            .and_then(|v| scalar_to_string(&v));
        let description = [descricao, accented_description, resumo]
            .into_iter()
            .flatten()
            .find(|d| !d.trim().is_empty());

        let discount_duration = DISCOUNT_DURATION_KEYS.iter().find_map(|key| {
            extra
                .get(*key)
                .and_then(scalar_to_string)
                .filter(|s| s != "false" && s != "0")
        });

        let mut specifications = BTreeMap::new();
        if let Some(Value::Object(explicit)) = especificacoes {
            for (key, value) in explicit {
                if let Some(text) = scalar_to_string(&value) {
                    specifications.insert(key, text);
                }
            }
        }
        for (key, value) in extra {
            if RESERVED_KEYS.contains(&key.as_str())
                || DISCOUNT_DURATION_KEYS.contains(&key.as_str())
            {
                continue;
            }
            if let Some(text) = scalar_to_string(&value) {
                specifications.entry(key).or_insert(text);
            }
        }

        Self {
            id: ProductId::new(id),
            name: nome,
            category: categoria,
            price: preco,
            discount: desconto.unwrap_or(0.0),
            image: imagem.filter(|s| !s.trim().is_empty()),
            description,
            discount_duration,
            specifications,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Product {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_record_fields_map_to_product() {
        let p = parse(json!({
            "id": 3,
            "nome": "SSD 1TB",
            "categoria": "Armazenamento",
            "preco": 450.0,
            "desconto": 0.1,
            "imagem": "img/ssd.png",
            "descricao": "Rápido"
        }));

        assert_eq!(p.id, ProductId::new(3));
        assert_eq!(p.name, "SSD 1TB");
        assert_eq!(p.category, "Armazenamento");
        assert_eq!(p.price, 450.0);
        assert!((p.discount_rate() - 0.1).abs() < 1e-9);
        assert_eq!(p.image.as_deref(), Some("img/ssd.png"));
        assert_eq!(p.description.as_deref(), Some("Rápido"));
        assert!(p.specifications.is_empty());
    }

    #[test]
    fn test_summary_used_when_description_missing() {
        let p = parse(json!({"id": 1, "nome": "X", "preco": 1, "resumo": "curto"}));
        assert_eq!(p.description.as_deref(), Some("curto"));
    }

    #[test]
    fn test_extra_scalars_become_specifications() {
        let p = parse(json!({
            "id": 1,
            "nome": "Placa",
            "preco": 1000,
            "marca": "ACME",
            "memoria": 16,
            "rgb": true,
            "notas": "",
            "portas": ["hdmi"],
            "detalhes": {"a": 1},
            "vazio": null,
            "descontoDuracao": "até domingo"
        }));

        assert_eq!(p.specifications.get("marca").map(String::as_str), Some("ACME"));
        assert_eq!(p.specifications.get("memoria").map(String::as_str), Some("16"));
        assert_eq!(p.specifications.get("rgb").map(String::as_str), Some("true"));
        assert!(!p.specifications.contains_key("notas"));
        assert!(!p.specifications.contains_key("portas"));
        assert!(!p.specifications.contains_key("detalhes"));
        assert!(!p.specifications.contains_key("vazio"));
        assert!(!p.specifications.contains_key("descontoDuracao"));
        assert_eq!(p.discount_duration.as_deref(), Some("até domingo"));
    }

    #[test]
    fn test_explicit_specifications_object_is_merged() {
        let p = parse(json!({
            "id": 1,
            "nome": "Cabo",
            "preco": 10,
            "especificacoes": {"comprimento": "2m", "cor": "preto"},
            "cor": "branco"
        }));

        assert_eq!(p.specifications.get("comprimento").map(String::as_str), Some("2m"));
        assert_eq!(p.specifications.get("cor").map(String::as_str), Some("preto"));
    }

    #[test]
    fn test_whole_float_renders_without_fraction() {
        let p = parse(json!({"id": 1, "nome": "X", "preco": 1, "tdp": 65.0, "peso": 1.5}));
        assert_eq!(p.specifications.get("tdp").map(String::as_str), Some("65"));
        assert_eq!(p.specifications.get("peso").map(String::as_str), Some("1.5"));
    }

    #[test]
    fn test_invalid_discounts_count_as_none() {
        for raw in [-0.2, 1.0, 1.5, f64::NAN] {
            let p = Product::new(1, "X", "Y", 100.0).with_discount(raw);
            assert_eq!(p.discount_rate(), 0.0);
            assert!(!p.has_discount());
            assert_eq!(p.discounted_price(), 100.0);
        }
    }

    #[test]
    fn test_discount_percent_rounds() {
        let p = Product::new(1, "X", "Y", 100.0).with_discount(0.155);
        assert_eq!(p.discount_percent(), 16);
    }

    #[test]
    fn test_placeholder_images_are_not_real() {
        let base = Product::new(1, "X", "Y", 1.0);
        assert!(!base.has_real_image());
        assert!(!base.clone().with_image("https://via.placeholder.com/300").has_real_image());
        assert!(!base.clone().with_image("https://dummyimage.test/300?text=GPU").has_real_image());
        assert!(base.with_image("assets/img/gpu.webp").has_real_image());
    }

    #[test]
    fn test_ordered_specifications() {
        let p = Product::new(1, "X", "Y", 1.0)
            .with_spec("zeta", "1")
            .with_spec("garantia", "12 meses")
            .with_spec("Marca", "ACME")
            .with_spec("alpha_beta", "2");

        let labels: Vec<String> = p.ordered_specifications().into_iter().map(|(k, _)| k).collect();
        assert_eq!(labels, vec!["Garantia", "Marca", "Alpha Beta", "Zeta"]);
    }

    #[test]
    fn test_missing_required_field_is_error() {
        let result: Result<Product, _> = serde_json::from_value(json!({"id": 1, "preco": 2}));
        assert!(result.is_err());
    }
}
