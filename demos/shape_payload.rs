//! Exercise the payload-shaping layer without a server or network.
//!
//! Usage:
//!   `cargo run --example shape_payload`

use kiriminaja_proxy::shipping::request::{build_pricing_payload, forwardable_query};
use kiriminaja_proxy::shipping::types::{ParamValue, PricingParams};

fn main() {
    // District ids and weights may arrive as strings or numbers; the
    // builder stringifies everything and fills in the captcha token.
    let params = PricingParams {
        from: Some(ParamValue::from("66268")),
        thru: Some(ParamValue::from("66225")),
        weight: Some(ParamValue::from(1000i64)),
        width: Some(ParamValue::from(15i64)),
        height: None,
        length: None,
    };

    let payload = build_pricing_payload(&params).unwrap();
    println!("=== Outbound pricing payload ===");
    println!("{}", serde_json::to_string_pretty(&payload).unwrap());

    let rejected = build_pricing_payload(&PricingParams::default());
    println!();
    println!("Missing required fields -> {}", rejected.unwrap_err());

    println!();
    println!("=== Query gating ===");
    for q in ["a", "  ", " bandung "] {
        match forwardable_query(Some(q)) {
            Some(t) => println!("query {:?} -> forwarded as {:?}", q, t),
            None => println!("query {:?} -> short-circuited, no upstream call", q),
        }
    }
}
