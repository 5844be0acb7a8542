//! HTML pages rendered with Maud. Interpolated values are escaped by the macro.

use axum::response::Html;
use catalog_core::{ContactMessage, Listing, ListingInput};
use maud::{html, Markup, DOCTYPE};

/// Feedback banner shown above a form.
pub enum Notice<'a> {
    Success(&'a str),
    Error(&'a str),
}

fn layout(title: &str, body: Markup) -> Html<String> {
    let page = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
                link rel="stylesheet" href="/css/styles.css";
            }
            body {
                nav {
                    a href="/" { "Home" } " "
                    a href="/items" { "Collection" } " "
                    a href="/about" { "About" } " "
                    a href="/services" { "Services" } " "
                    a href="/blog" { "Blog" } " "
                    a href="/contact" { "Contact" }
                }
                main {
                    h1 { (title) }
                    (body)
                }
            }
        }
    };
    Html(page.into_string())
}

fn notice(notice: Option<Notice<'_>>) -> Markup {
    html! {
        @match notice {
            Some(Notice::Success(text)) => {
                p.notice.success { (text) }
            },
            Some(Notice::Error(text)) => {
                p.notice.error { (text) }
            },
            None => {},
        }
    }
}

fn listing_cards(listings: &[Listing]) -> Markup {
    html! {
        @if listings.is_empty() {
            p { "No listings yet." }
        } @else {
            ul.cards {
                @for listing in listings {
                    li.card {
                        @if !listing.image.is_empty() {
                            img src=(listing.image) alt="";
                        }
                        a href={ "/items/" (listing.slug) } { (listing.title) }
                        " "
                        span.price { (listing.price) }
                    }
                }
            }
        }
    }
}

pub fn home(featured: &[Listing], categories: &[String]) -> Html<String> {
    layout(
        "Home",
        html! {
            h2 { "Featured" }
            (listing_cards(featured))
            h2 { "Browse by category" }
            ul {
                @for category in categories {
                    li { a href={ "/category/" (category) } { (category) } }
                }
            }
        },
    )
}

pub fn static_page(title: &str, text: &str) -> Html<String> {
    layout(title, html! { p { (text) } })
}

pub fn message_page(title: &str, text: &str) -> Html<String> {
    static_page(title, text)
}

pub fn contact(status: Option<Notice<'_>>) -> Html<String> {
    layout(
        "Contact",
        html! {
            (notice(status))
            form method="post" action="/contact" {
                label { "Name " input name="name"; }
                label { "Email " input name="email" type="email"; }
                label { "Message " textarea name="message" {} }
                button type="submit" { "Send" }
            }
        },
    )
}

pub fn collection(title: &str, listings: &[Listing]) -> Html<String> {
    layout(title, listing_cards(listings))
}

pub fn detail(listing: &Listing) -> Html<String> {
    layout(
        &listing.title,
        html! {
            div.gallery {
                @for image in &listing.images {
                    img src=(image) alt="";
                }
            }
            p.price { (listing.price) }
            @if !listing.category.is_empty() {
                p {
                    "Category: "
                    a href={ "/category/" (listing.category) } { (listing.category) }
                }
            }
            p { "Mileage: " (listing.mileage) }
            p { (listing.description) }
        },
    )
}

pub fn not_found() -> Html<String> {
    static_page("Not Found", "The page you were looking for does not exist.")
}

pub fn server_error() -> Html<String> {
    static_page("Server Error", "Something went wrong. Please try again later.")
}

pub fn login(error: Option<&str>) -> Html<String> {
    layout(
        "Admin Login",
        html! {
            (notice(error.map(Notice::Error)))
            form method="post" action="/admin/login" {
                label { "Passcode " input name="passcode" type="password"; }
                button type="submit" { "Log in" }
            }
        },
    )
}

pub fn dashboard(listings: &[Listing], messages: &[ContactMessage]) -> Html<String> {
    layout(
        "Admin",
        html! {
            p { a href="/admin/items/new" { "New listing" } }
            form method="post" action="/admin/logout" {
                button type="submit" { "Log out" }
            }
            table {
                tr { th { "Title" } th { "Price" } th { "Featured" } th {} }
                @for listing in listings {
                    tr {
                        td { a href={ "/items/" (listing.slug) } { (listing.title) } }
                        td { (listing.price) }
                        td { @if listing.featured { "yes" } }
                        td {
                            a href={ "/admin/items/" (listing.slug) "/edit" } { "Edit" }
                            form method="post" action={ "/admin/items/" (listing.slug) "/delete" } {
                                button type="submit" { "Delete" }
                            }
                        }
                    }
                }
            }
            h2 { "Messages" }
            ul {
                @for message in messages {
                    li {
                        strong { (message.name) }
                        " <" (message.email) "> "
                        @if let Some(at) = message.received_at {
                            (at.format("%Y-%m-%d %H:%M").to_string())
                        }
                        p { (message.message) }
                    }
                }
            }
        },
    )
}

/// Create form when `slug` is `None`, edit form otherwise.
pub fn listing_form(slug: Option<&str>, input: &ListingInput, error: Option<&str>) -> Html<String> {
    let (title, action) = match slug {
        Some(slug) => ("Edit Listing", format!("/admin/items/{slug}")),
        None => ("New Listing", "/admin/items".to_string()),
    };
    let field = |value: &Option<String>| value.clone().unwrap_or_default();

    layout(
        title,
        html! {
            (notice(error.map(Notice::Error)))
            form method="post" action=(action) {
                label { "Title " input name="title" value=(field(&input.title)); }
                label { "Price " input name="price" value=(field(&input.price)); }
                label { "Category " input name="category" value=(field(&input.category)); }
                label { "Mileage " input name="mileage" value=(field(&input.mileage)); }
                label { "Description " textarea name="description" { (field(&input.description)) } }
                label { "Image 1 " input name="image1" value=(field(&input.image1)); }
                label { "Image 2 " input name="image2" value=(field(&input.image2)); }
                label { "Image 3 " input name="image3" value=(field(&input.image3)); }
                label {
                    input type="checkbox" name="featured" value="on" checked[input.is_featured()];
                    " Featured"
                }
                button type="submit" { "Save" }
            }
        },
    )
}
