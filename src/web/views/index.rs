use maud::{html, Markup, PreEscaped, DOCTYPE};
use poem::web::{Data, Html};
use poem::{handler, IntoResponse};

use crate::encoding::{CategoricalColumn, LabelEncoder};
use crate::features::REFERENCE_YEAR;
use crate::predictor::Predictor;
use crate::prelude::*;

const CACHE_CONTROL: &str = "no-cache";

// language=javascript
const SCRIPT: &str = r#"
document.getElementById("form").addEventListener("submit", async (event) => {
    event.preventDefault();
    const form = new FormData(event.target);
    const output = document.getElementById("output");
    const response = await fetch("/predict", {
        method: "POST",
        headers: {"Content-Type": "application/json"},
        body: JSON.stringify({
            year: Number(form.get("year")),
            present_price: Number(form.get("present_price")),
            kms_driven: Number(form.get("kms_driven")),
            fuel_type: form.get("fuel_type"),
            seller_type: form.get("seller_type"),
            transmission: form.get("transmission"),
        }),
    });
    const result = await response.json();
    output.classList.remove("is-hidden", "is-success", "is-danger");
    if (result.success) {
        output.classList.add("is-success");
        output.textContent = `Estimated price: ${result.predicted_price.toFixed(2)} lakh`;
    } else {
        output.classList.add("is-danger");
        output.textContent = `${result.message}: ${result.error}`;
    }
});
"#;

/// Landing page with the prediction form.
#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get(Data(predictor): Data<&Arc<Predictor>>) -> impl IntoResponse {
    let encoders = predictor.encoders();
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Car Price Predictor" }
                link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bulma@0.9.4/css/bulma.min.css";
            }
            body {
                section.section {
                    div.container {
                        h1.title { "Car Price Predictor" }
                        p.subtitle { "Estimate the resale price of a used car" }

                        form id="form" {
                            (number_field("year", "Year", "2015", "1"))
                            (number_field("present_price", "Present price, lakh", "9.5", "0.01"))
                            (number_field("kms_driven", "Kilometers driven", "40000", "1"))
                            (select_field("fuel_type", CategoricalColumn::Fuel, &encoders.fuel))
                            (select_field("seller_type", CategoricalColumn::Seller, &encoders.seller))
                            (select_field("transmission", CategoricalColumn::Transmission, &encoders.transmission))
                            div.field {
                                div.control {
                                    button.button.is-link type="submit" { "Predict" }
                                }
                            }
                        }

                        div.notification."mt-4".is-hidden id="output" {}

                        p.help { "Car age is counted from " (REFERENCE_YEAR) "." }
                    }
                }
                script { (PreEscaped(SCRIPT)) }
            }
        }
    };
    Html(markup.into_string()).with_header("Cache-Control", CACHE_CONTROL)
}

fn number_field(name: &str, label: &str, placeholder: &str, step: &str) -> Markup {
    html! {
        div.field {
            label.label for=(name) { (label) }
            div.control {
                input.input id=(name) type="number" name=(name) placeholder=(placeholder) step=(step) required;
            }
        }
    }
}

fn select_field(name: &str, column: CategoricalColumn, encoder: &LabelEncoder) -> Markup {
    html! {
        div.field {
            label.label for=(name) { (capitalize(&column.to_string())) }
            div.control {
                div.select {
                    select id=(name) name=(name) required {
                        @for class in encoder.classes() {
                            option value=(class) { (class) }
                        }
                    }
                }
            }
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
