//! Integration tests for end-to-end frame behavior spanning index, storage,
//! sort, and the parallel engine together — the properties that only show up
//! once those pieces are wired into a real `Frame`, as opposed to the
//! per-module unit tests colocated with their own source files.

use gridframe::{Direction, ElementType, Frame, KeyIndex, TypedArray as _, Value, ZonedDateTimeArray};

fn dates() -> Vec<String> {
    vec!["2013-06-02", "2013-06-03", "2013-06-04", "2013-06-05", "2013-06-06", "2013-06-07"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn tickers() -> Vec<String> {
    vec!["AAPL", "ORCL", "GOOGL", "BLK", "YHOO"].into_iter().map(String::from).collect()
}

/// S1: sorting columns by the values held at one row preserves row order
/// and leaves that row's values non-decreasing across the new column order.
#[test]
fn sorting_columns_by_a_single_row_orders_that_rows_values() {
    let frame: Frame<String, String> = Frame::of(dates(), tickers(), ElementType::Double).unwrap();

    // Deterministic "random" fill: every (row, col) gets a distinct value.
    let seeds: [[f64; 5]; 6] = [
        [12.0, 44.0, 3.0, 91.0, 27.0],
        [5.0, 18.0, 60.0, 2.0, 33.0],
        [71.0, 9.0, 40.0, 15.0, 1.0],
        [8.0, 63.0, 21.0, 34.0, 19.0],
        [55.0, 4.0, 17.0, 82.0, 6.0],
        [30.0, 11.0, 66.0, 25.0, 3.0],
    ];
    for (row, values) in seeds.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            frame.set(row, col, Value::Double(*value)).unwrap();
        }
    }

    let pivot_row = "2013-06-04".to_string();
    let sorted = frame.sort_cols_by_rows(&[pivot_row.clone()], &[Direction::Ascending], false).unwrap();

    assert_eq!(sorted.rows().keys_in_order(), frame.rows().keys_in_order());

    let pivot_ordinal = sorted.rows().ordinal_of_key(&pivot_row).unwrap();
    for col in 1..sorted.n_cols() {
        let prev = sorted.get(pivot_ordinal, col - 1).unwrap();
        let next = sorted.get(pivot_ordinal, col).unwrap();
        assert_ne!(prev.compare(&next), Some(std::cmp::Ordering::Greater));
    }
}

/// S2: multi-key row sort over a heterogeneous column set yields a
/// lexicographically non-decreasing ordering across every adjacent pair,
/// with repeated sentinel values exercising the stability of ties.
#[test]
fn sorting_rows_by_several_columns_is_lexicographically_ordered() {
    const N: usize = 500;
    let row_keys: Vec<usize> = (0..N).collect();

    let frame: Frame<usize, String> = Frame::of_with(row_keys, |f| {
        let n = f.n_rows();
        f.add_column("Booleans".into(), gridframe::Array::create(ElementType::Boolean, n, None, None))?;
        f.add_column("Integers".into(), gridframe::Array::create(ElementType::Int, n, None, None))?;
        f.add_column("Longs".into(), gridframe::Array::create(ElementType::Long, n, None, None))?;
        f.add_column("Doubles".into(), gridframe::Array::create(ElementType::Double, n, None, None))?;
        f.add_column("Strings".into(), gridframe::Array::create(ElementType::String, n, None, None))?;
        f.add_column("Dates".into(), gridframe::Array::create(ElementType::LocalDate, n, None, None))?;
        Ok(())
    })
    .unwrap();

    for row in 0..N {
        // Repeated sentinel values: only a handful of distinct buckets per
        // column, so the sort must fall through ties via later keys.
        frame.set(row, 0, Value::Boolean(row % 2 == 0)).unwrap();
        frame.set(row, 1, Value::Int((row % 7) as i32)).unwrap();
        frame.set(row, 2, Value::Long((row % 5) as i64)).unwrap();
        frame.set(row, 3, Value::Double((row % 3) as f64)).unwrap();
        frame.set(row, 4, Value::String(format!("s{}", row % 11))).unwrap();
        frame.set(row, 5, Value::LocalDate((row % 13) as i32)).unwrap();
    }

    let sort_cols = ["Booleans", "Integers", "Longs", "Doubles", "Dates"].map(String::from);
    let directions = [Direction::Ascending; 5];
    let sorted = frame.sort_by_columns(&sort_cols, &directions, false).unwrap();

    let sort_col_ordinals: Vec<usize> = sort_cols.iter().map(|k| sorted.cols().ordinal_of_key(k).unwrap()).collect();
    for row in 0..N - 1 {
        let a: Vec<Value> = sort_col_ordinals.iter().map(|&c| sorted.get(row, c).unwrap()).collect();
        let b: Vec<Value> = sort_col_ordinals.iter().map(|&c| sorted.get(row + 1, c).unwrap()).collect();
        let mut ord = std::cmp::Ordering::Equal;
        for (x, y) in a.iter().zip(b.iter()) {
            ord = x.compare(y).unwrap();
            if ord != std::cmp::Ordering::Equal {
                break;
            }
        }
        assert_ne!(ord, std::cmp::Ordering::Greater, "row {row} should sort <= row {}", row + 1);
    }
}

/// S3: two zoned timestamps with the same literal instant payload but
/// different zones are not equal; an untouched sparse slot still reads back
/// as the array's default.
#[test]
fn zoned_equality_is_sensitive_to_zone_not_just_payload() {
    let mut a = ZonedDateTimeArray::sparse(4, "UTC");
    a.set_zoned(1, 0, "UTC+05:00").unwrap();

    // ordinal 3 is untouched, so it still reads the sparse default (epoch 0, zone "UTC").
    assert!(!a.is_equal_to(1, &a, 3).unwrap());
    assert_eq!(a.zone_name(3).unwrap().as_deref(), Some("UTC"));
    assert_eq!(a.get(3).unwrap().epoch_ms, 0);
}

/// S4: replacing a key in a root index preserves its coordinate while the
/// old key becomes invisible and the new one resolves to the same ordinal.
#[test]
fn replacing_an_index_key_preserves_its_coordinate() {
    let idx: KeyIndex<i32> = KeyIndex::of(vec![10, 20, 30]).unwrap();
    let prior_coordinate = idx.coordinate(&20).unwrap();

    idx.replace(&20, 25).unwrap();

    assert!(!idx.contains(&20));
    assert!(idx.contains(&25));
    assert_eq!(idx.ordinal_of_key(&25), Some(1));
    assert_eq!(idx.coordinate(&25), Some(prior_coordinate));
}

/// S5: a parallel bulk apply and its sequential twin produce bit-identical
/// output, regardless of how the work was partitioned internally.
#[test]
fn parallel_apply_matches_sequential_apply_bit_for_bit() {
    const ROWS: usize = 4_000;
    let row_keys: Vec<usize> = (0..ROWS).collect();
    let col_keys: Vec<String> = (0..5).map(|c| format!("c{c}")).collect();

    let seq_frame: Frame<usize, String> = Frame::of(row_keys.clone(), col_keys.clone(), ElementType::Double).unwrap();
    for row in 0..ROWS {
        for col in 0..5 {
            seq_frame.set(row, col, Value::Double(((row * 31 + col * 7) % 997) as f64)).unwrap();
        }
    }
    let par_frame = seq_frame.copy();

    seq_frame
        .apply(
            |v| match v {
                Value::Double(x) => Value::Double(x * 2.0),
                other => other.clone(),
            },
            false,
        )
        .unwrap();
    par_frame
        .apply(
            |v| match v {
                Value::Double(x) => Value::Double(x * 2.0),
                other => other.clone(),
            },
            true,
        )
        .unwrap();

    assert!(seq_frame == par_frame);
}

/// S6: `head` returns a view sharing the parent's backing storage — a write
/// through the view is visible from the parent frame.
#[test]
fn head_view_shares_storage_with_its_parent() {
    let row_keys: Vec<String> = (0..10).map(|r| format!("r{r}")).collect();
    let frame: Frame<String, String> = Frame::of(row_keys.clone(), vec!["v".into()], ElementType::Int).unwrap();
    for row in 0..10 {
        frame.set(row, 0, Value::Int(row as i32)).unwrap();
    }

    let head = frame.head(3);
    assert_eq!(head.n_rows(), 3);
    assert_eq!(head.n_cols(), frame.n_cols());
    assert_eq!(head.rows().keys_in_order(), row_keys[0..3].to_vec());

    head.set(0, 0, Value::Int(999)).unwrap();
    assert_eq!(frame.get(0, 0).unwrap(), Value::Int(999));
}
