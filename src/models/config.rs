use serde::{Deserialize, Serialize};

/// Site-wide configuration persisted as `config.json` in the data directory.
///
/// Everything is optional on disk; missing sections fall back to the
/// defaults below so a fresh data directory works without any setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default = "default_products")]
    pub products: Vec<ProductConfig>,
    #[serde(default)]
    pub display: DisplayConfig,
    /// Shared admin credential. Login is disabled until this is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<AdminConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            products: default_products(),
            display: DisplayConfig::default(),
            admin: None,
        }
    }
}

impl AppConfig {
    /// Whether `product` is an enabled product tag. An empty product list
    /// accepts any tag.
    pub fn is_valid_product(&self, product: &str) -> bool {
        if self.products.is_empty() {
            return true;
        }
        self.products
            .iter()
            .any(|p| p.enabled && p.name == product)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub logo: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Changelog".to_string(),
            description: "持续改进，不断进化".to_string(),
            domain: String::new(),
            logo: "/logo.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConfig {
    pub id: String,
    pub name: String,
    pub label: String,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayConfig {
    pub items_per_page: u32,
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            items_per_page: 10,
            date_format: "YYYY-MM-DD".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

fn default_products() -> Vec<ProductConfig> {
    ["IDE", "JetBrains", "CLI"]
        .into_iter()
        .enumerate()
        .map(|(i, name)| ProductConfig {
            id: name.to_lowercase(),
            name: name.to_string(),
            label: name.to_string(),
            enabled: true,
            icon: None,
            order: i as u32,
        })
        .collect()
}
