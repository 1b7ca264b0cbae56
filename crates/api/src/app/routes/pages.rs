use axum::response::Html;

const PRODUCTS_PAGE: &str = include_str!("../../../static/index.html");
const SUPPLIERS_PAGE: &str = include_str!("../../../static/suppliers.html");

pub async fn products_page() -> Html<&'static str> {
    Html(PRODUCTS_PAGE)
}

pub async fn suppliers_page() -> Html<&'static str> {
    Html(SUPPLIERS_PAGE)
}
