// Copyright 2025 Cowboy AI, LLC.

//! Stack-on-List demo: compose a Stack maker over a List maker and drive
//! the resulting instance through push/pop.

use maker::{make, Bundle, MakeResult, Maker, Part, Value};
use serde_json::json;

fn list_maker() -> Maker {
    Maker::with_init(
        |instance, options| {
            let seed = options.get("list").cloned().unwrap_or_else(|| json!([]));
            instance.set("list", seed);
            Ok(())
        },
        Bundle::new()
            .method("add", |instance, args| {
                if let Some(Value::Array(items)) = instance.get_mut("list") {
                    items.extend(args.iter().cloned());
                }
                Ok(Value::Null)
            })
            .method("get", |instance, args| {
                let index = args.first().and_then(Value::as_u64).map(|i| i as usize);
                let item = match (instance.get("list"), index) {
                    (Some(Value::Array(items)), Some(i)) => items.get(i).cloned(),
                    _ => None,
                };
                Ok(item.unwrap_or(Value::Null))
            })
            .method("removeIndex", |instance, args| {
                let index = args.first().and_then(Value::as_u64).map(|i| i as usize);
                if let (Some(Value::Array(items)), Some(i)) = (instance.get_mut("list"), index)
                {
                    if i < items.len() {
                        items.remove(i);
                    }
                }
                Ok(Value::Null)
            })
            .method("getLength", |instance, _args| {
                let len = match instance.get("list") {
                    Some(Value::Array(items)) => items.len(),
                    _ => 0,
                };
                Ok(json!(len))
            }),
    )
}

fn main() -> MakeResult<()> {
    let list = list_maker();

    let mut stack = make([Part::from(
        Bundle::new()
            .method("push", |instance, args| instance.call("add", args))
            .method("pop", |instance, _args| {
                let len = instance.call("getLength", &[])?.as_i64().unwrap_or(0);
                if len == 0 {
                    return Ok(Value::Null);
                }
                let last = json!(len - 1);
                let value = instance.call("get", &[last.clone()])?;
                instance.call("removeIndex", &[last])?;
                Ok(value)
            }),
    )]);
    stack.inherit([&list])?;

    let mut instance = stack.create()?;
    for value in 1..=3 {
        instance.call("push", &[json!(value)])?;
        println!("pushed {value}");
    }

    while instance.call("getLength", &[])?.as_i64().unwrap_or(0) > 0 {
        let popped = instance.call("pop", &[])?;
        println!("popped {popped}");
    }

    Ok(())
}
