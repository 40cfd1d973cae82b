//! Operator-facing text in Arabic and English.
//!
//! Pages render every label through [`Texts`]; errors shown on a page go
//! through [`describe_error`] so the operator never sees raw upstream
//! messages without a localized lead-in.

use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Language of the operator pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// Arabic, right-to-left.
    #[default]
    Ar,
    /// English.
    En,
}

impl Locale {
    /// BCP 47 language code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::En => "en",
        }
    }

    /// Text direction for the `dir` attribute.
    #[must_use]
    pub const fn dir(self) -> &'static str {
        match self {
            Self::Ar => "rtl",
            Self::En => "ltr",
        }
    }

    /// Label table for this locale.
    #[must_use]
    pub const fn texts(self) -> &'static Texts {
        match self {
            Self::Ar => &AR,
            Self::En => &EN,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" => Ok(Self::Ar),
            "en" => Ok(Self::En),
            other => Err(format!("unsupported locale '{other}' (expected ar or en)")),
        }
    }
}

/// What the operator was doing when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Loading the product list.
    Fetch,
    /// Saving a product's policy.
    Update,
}

/// All labels and messages shown on the operator pages.
#[derive(Debug)]
pub struct Texts {
    pub app_title: &'static str,
    pub products_heading: &'static str,
    pub quote_heading: &'static str,
    pub nav_products: &'static str,
    pub nav_quote: &'static str,
    pub col_product: &'static str,
    pub col_current_price: &'static str,
    pub col_bulk_quantity: &'static str,
    pub col_bulk_price: &'static str,
    pub col_update: &'static str,
    pub update_button: &'static str,
    pub no_products: &'static str,
    pub update_saved: &'static str,
    pub fetch_failed: &'static str,
    pub update_failed: &'static str,
    pub no_session: &'static str,
    pub product_not_found: &'static str,
    pub invalid_input: &'static str,
    pub rate_limited: &'static str,
    pub select_product: &'static str,
    pub select_placeholder: &'static str,
    pub quantity: &'static str,
    pub calculate_button: &'static str,
    pub final_price: &'static str,
    pub total: &'static str,
    pub price_details: &'static str,
    pub regular_price: &'static str,
    pub bulk_quantity: &'static str,
    pub bulk_price: &'static str,
    pub unit: &'static str,
    pub savings: &'static str,
    pub no_policy: &'static str,
}

const AR: Texts = Texts {
    app_title: "Wholesale Tool - إدارة البيع بالجملة",
    products_heading: "إدارة المنتجات",
    quote_heading: "اختبار حساب سعر الجملة",
    nav_products: "المنتجات",
    nav_quote: "حاسبة السعر",
    col_product: "المنتج",
    col_current_price: "السعر الحالي",
    col_bulk_quantity: "الكمية المطلوبة للتخفيض",
    col_bulk_price: "سعر الجملة",
    col_update: "التحديث",
    update_button: "تحديث",
    no_products: "لا توجد منتجات",
    update_saved: "تم تحديث المنتج بنجاح",
    fetch_failed: "حدث خطأ أثناء جلب المنتجات",
    update_failed: "حدث خطأ أثناء تحديث المنتج",
    no_session: "لا توجد جلسة نشطة",
    product_not_found: "المنتج غير موجود",
    invalid_input: "قيمة غير صالحة",
    rate_limited: "تم تجاوز حد الطلبات، حاول مرة أخرى لاحقاً",
    select_product: "اختر المنتج",
    select_placeholder: "اختر المنتج...",
    quantity: "الكمية",
    calculate_button: "احسب",
    final_price: "السعر النهائي",
    total: "الإجمالي",
    price_details: "تفاصيل السعر",
    regular_price: "السعر العادي:",
    bulk_quantity: "كمية التخفيض:",
    bulk_price: "سعر الجملة:",
    unit: "وحدة",
    savings: "التوفير:",
    no_policy: "لا يوجد سعر جملة لهذا المنتج",
};

const EN: Texts = Texts {
    app_title: "Wholesale Tool",
    products_heading: "Products",
    quote_heading: "Wholesale price calculator",
    nav_products: "Products",
    nav_quote: "Price calculator",
    col_product: "Product",
    col_current_price: "Current price",
    col_bulk_quantity: "Bulk quantity",
    col_bulk_price: "Bulk price",
    col_update: "Update",
    update_button: "Update",
    no_products: "No products",
    update_saved: "Product updated",
    fetch_failed: "Failed to fetch products",
    update_failed: "Failed to update product",
    no_session: "No active session found",
    product_not_found: "Product not found",
    invalid_input: "Invalid value",
    rate_limited: "Too many requests, try again later",
    select_product: "Select product",
    select_placeholder: "Select a product...",
    quantity: "Quantity",
    calculate_button: "Calculate",
    final_price: "Final price",
    total: "Total",
    price_details: "Price details",
    regular_price: "Regular price:",
    bulk_quantity: "Bulk quantity:",
    bulk_price: "Bulk price:",
    unit: "units",
    savings: "You save:",
    no_policy: "No wholesale price for this product",
};

/// Localized message for an error raised during `action`.
///
/// Operator input problems and store-side validation keep their detail;
/// upstream and internal failures collapse to the generic message.
#[must_use]
pub fn describe_error(locale: Locale, err: &AppError, action: Action) -> String {
    let t = locale.texts();
    let generic = match action {
        Action::Fetch => t.fetch_failed,
        Action::Update => t.update_failed,
    };

    match err {
        AppError::Unauthorized(_) => t.no_session.to_string(),
        AppError::NotFound(_) => t.product_not_found.to_string(),
        AppError::BadRequest(detail) => format!("{}: {detail}", t.invalid_input),
        AppError::Validation(detail) => format!("{generic}: {detail}"),
        AppError::RateLimited(_) => t.rate_limited.to_string(),
        AppError::Shopify { .. } | AppError::Internal(_) => generic.to_string(),
    }
}
