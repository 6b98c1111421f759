use std::collections::BTreeMap;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use returnshield_core::{LineItem, LineItemId, Order, OrderId};
use returnshield_insights::{PRESETS, RoiInputs, forecast, top_reason};
use returnshield_returns::{SelectedItems, refund_amount};
use rust_decimal::Decimal;

fn order_with_items(count: usize) -> Order {
    Order {
        id: OrderId::new(1),
        order_number: "#BENCH".to_string(),
        created_at: "2024-01-01T00:00:00Z".to_string(),
        currency: "USD".to_string(),
        items: (0..count)
            .map(|i| LineItem {
                line_item_id: LineItemId::new(format!("li-{i}")),
                title: format!("Item {i}"),
                price: Decimal::new(1999 + i as i64, 2),
                quantity: 1,
                sku: format!("SKU-{i}"),
                variant_title: None,
            })
            .collect(),
    }
}

fn bench_roi_forecast(c: &mut Criterion) {
    c.bench_function("roi_forecast_presets", |b| {
        b.iter(|| {
            for preset in &PRESETS {
                let mut inputs = RoiInputs::default();
                inputs.apply_preset(preset);
                black_box(forecast(black_box(&inputs)));
            }
        })
    });
}

fn bench_refund_amount(c: &mut Criterion) {
    let mut group = c.benchmark_group("refund_amount");
    for size in [5usize, 50, 250] {
        let order = order_with_items(size);
        let mut selected = SelectedItems::new();
        for item in order.items.iter().step_by(2) {
            selected.toggle(item.line_item_id.clone());
        }
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(refund_amount(black_box(&order), &selected)))
        });
    }
    group.finish();
}

fn bench_top_reason(c: &mut Criterion) {
    let reasons: BTreeMap<String, u64> = (0..200)
        .map(|i| (format!("reason-{i:03}"), (i * 7 % 31) as u64))
        .collect();
    c.bench_function("top_reason_200", |b| {
        b.iter(|| black_box(top_reason(black_box(&reasons))))
    });
}

criterion_group!(benches, bench_roi_forecast, bench_refund_amount, bench_top_reason);
criterion_main!(benches);
