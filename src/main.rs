//! Storefront - demo driver
//!
//! Runs a worker thread that lists, re-prices and moves items between two
//! outlets while the main thread tries to buy, closes one outlet and buys
//! again. Every outcome is printed; absence is never an error.
//!
//! Set `RUST_LOG=debug` to see each registration step.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use storefront::types::price::{format_price, is_for_sale, parse_price};
use storefront::{observability, Item, Outlet, PriceError};

const FIRST_PRICE: &str = "10.00";
const SECOND_PRICE: &str = "15.00";
const DISCOUNT_PRICE: &str = "5.99";

/// How long the worker lingers before finishing
const WORKER_LINGER: Duration = Duration::from_millis(100);

fn report(what: &str, price: f64) {
    if is_for_sale(price) {
        println!("{what}: price {}", format_price(price));
    } else {
        println!("{what}: not available :(");
    }
}

fn main() -> Result<(), PriceError> {
    observability::init();

    println!("===========================================");
    println!("  Storefront - item/outlet registry demo");
    println!("===========================================");
    println!();

    let outlet1 = Outlet::named("outlet-1");
    let outlet2 = Outlet::named("outlet-2");
    let item2 = Item::named("item-2", parse_price(SECOND_PRICE)?);
    let item1 = Item::named("item-1", parse_price(FIRST_PRICE)?);
    let discount = parse_price(DISCOUNT_PRICE)?;

    let worker = {
        let (item1, item2) = (Arc::clone(&item1), Arc::clone(&item2));
        let (w_outlet1, w_outlet2) = (Arc::downgrade(&outlet1), Arc::downgrade(&outlet2));

        thread::spawn(move || {
            item1.attach(&w_outlet1);
            item1.attach(&w_outlet2);
            println!("item-1 is about to start selling!");
            item1.start_sales();

            item2.attach(&w_outlet2);
            item2.start_sales();
            println!("item-2 is about to start selling!");

            item1.detach(&w_outlet1);
            println!("item-1 is now only sold in outlet-2");

            println!("item-2 price change!");
            item2.change_price(discount);

            // outlet-1 may already be closed; attach then does nothing.
            println!("item-1 is about to return to outlet-1");
            item1.attach(&w_outlet1);

            thread::sleep(WORKER_LINGER);
        })
    };

    println!("Try to buy item-1 in outlet-1");
    report("item-1 @ outlet-1", outlet1.sell(&Arc::downgrade(&item1)));

    println!("Close outlet-1");
    drop(outlet1);

    println!("Buy item-2 from outlet-2");
    report("item-2 @ outlet-2", outlet2.sell(&Arc::downgrade(&item2)));

    if worker.join().is_err() {
        tracing::error!("worker thread panicked");
    }

    println!();
    println!("Final state:");
    println!("  {:?}", item1);
    println!("  {:?}", item2);
    println!("  {:?}", outlet2);

    Ok(())
}
