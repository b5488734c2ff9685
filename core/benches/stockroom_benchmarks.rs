use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use stockroom::export::parse_product_import;
use stockroom::{workflow_for, ContextData, Flow, FlowControl, FlowError, OrderStatus, StepDef};
use tokio::runtime::Runtime;

#[derive(Clone, Debug, Default)]
struct BenchContext {
  counter: u64,
}

fn increment_handler(iterations: u64) -> stockroom::flow::Handler<BenchContext, FlowError> {
  Box::new(move |ctx: ContextData<BenchContext>| {
    Box::pin(async move {
      let mut data = ctx.write();
      for _ in 0..iterations {
        data.counter = data.counter.wrapping_add(1);
      }
      Ok(FlowControl::Continue)
    })
  })
}

fn bench_flow_execution(c: &mut Criterion) {
  let mut group = c.benchmark_group("FlowExecution");
  let rt = Runtime::new().unwrap();

  for num_steps in [1usize, 4, 10] {
    let steps = (0..num_steps).map(|i| {
      if i + 1 == num_steps {
        StepDef::best_effort(format!("step_{}", i))
      } else {
        StepDef::critical(format!("step_{}", i))
      }
    });
    let mut flow = Flow::<BenchContext, FlowError>::new("bench", steps);
    for i in 0..num_steps {
      flow.on_boxed(&format!("step_{}", i), increment_handler(10));
    }
    let flow = Arc::new(flow);

    group.throughput(Throughput::Elements(num_steps as u64));
    group.bench_with_input(BenchmarkId::from_parameter(num_steps), &num_steps, |b, _| {
      b.to_async(&rt).iter_batched(
        || ContextData::new(BenchContext::default()),
        |ctx| {
          let flow = flow.clone();
          async move { flow.run(ctx).await.unwrap() }
        },
        criterion::BatchSize::SmallInput,
      );
    });
  }
  group.finish();
}

fn bench_status_model(c: &mut Criterion) {
  let mut group = c.benchmark_group("StatusModel");
  let raw: Vec<String> = OrderStatus::ALL
    .into_iter()
    .map(String::from)
    .chain(["unheard_of".to_string()])
    .collect();

  group.throughput(Throughput::Elements(raw.len() as u64));
  group.bench_function("parse_and_progress", |b| {
    b.iter(|| {
      for s in &raw {
        criterion::black_box(OrderStatus::parse(s).progress());
      }
    })
  });
  group.bench_function("workflow_for", |b| {
    b.iter(|| {
      for status in OrderStatus::ALL.iter() {
        criterion::black_box(workflow_for(status));
      }
    })
  });
  group.finish();
}

fn bench_import_parsing(c: &mut Criterion) {
  let mut text = String::from("name,sku,category,price,stock\n");
  for i in 0..500 {
    text.push_str(&format!("Item {},SKU-{},Apparel,{}.50,{}\n", i, i, 1000 + i, i % 40));
  }
  let mut group = c.benchmark_group("ImportParsing");
  group.throughput(Throughput::Elements(500));
  group.bench_function("parse_500_rows", |b| b.iter(|| criterion::black_box(parse_product_import(&text))));
  group.finish();
}

criterion_group!(benches, bench_flow_execution, bench_status_model, bench_import_parsing);
criterion_main!(benches);
