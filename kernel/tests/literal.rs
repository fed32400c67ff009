use std::collections::HashMap;

use expr_kernel::expressions::{ExpressionNode, LiteralNode, Scalar};
use expr_kernel::schema::DataType;
use expr_kernel::{ConversionOptions, Error};
use serde_json::json;
use test_case::test_case;

#[test_log::test]
fn double_literal_value_and_return_type() {
    let value = 1.5;
    let node = LiteralNode::double(value);

    assert_eq!(node.value_as::<f64>().unwrap(), value);
    assert_eq!(node.return_type(), DataType::Double);
    assert_ne!(node.return_type(), DataType::Integer);
    assert_ne!(node.return_type(), DataType::Boolean);
    assert_ne!(node.return_type(), DataType::String);
}

#[test_case(LiteralNode::double(-2.25), DataType::Double, Scalar::Double(-2.25); "double")]
#[test_case(LiteralNode::float(2.5), DataType::Float, Scalar::Float(2.5); "float")]
#[test_case(LiteralNode::long(1 << 40), DataType::Long, Scalar::Long(1 << 40); "long")]
#[test_case(LiteralNode::integer(-9), DataType::Integer, Scalar::Integer(-9); "integer")]
#[test_case(LiteralNode::boolean(true), DataType::Boolean, Scalar::Boolean(true); "boolean")]
#[test_case(LiteralNode::string("hi"), DataType::String, Scalar::String("hi".into()); "string")]
#[test_case(LiteralNode::binary(vec![7u8]), DataType::Binary, Scalar::Binary(vec![7]); "binary")]
fn value_and_type_round_trip(node: LiteralNode, data_type: DataType, value: Scalar) {
    assert_eq!(node.value().unwrap(), &value);
    assert_eq!(node.data_type(), data_type);
    assert!(!node.is_null());
}

#[test_case(DataType::Double)]
#[test_case(DataType::Integer)]
#[test_case(DataType::Decimal(10, 2))]
#[test_case(DataType::FixedSizeBinary(4))]
fn null_literal_value_is_an_error(data_type: DataType) {
    let node = LiteralNode::null(data_type.clone()).unwrap();
    assert!(node.is_null());
    assert_eq!(node.data_type(), data_type);
    match node.value() {
        Err(Error::NullValueAccess(actual)) => assert_eq!(actual, data_type),
        other => panic!("expected a null value access error, got {other:?}"),
    }
}

#[test_log::test]
fn nan_is_preserved_bit_for_bit() {
    let payload = f64::from_bits(0x7ff8_0000_dead_beef);
    let node = LiteralNode::double(payload);
    assert_eq!(node.value_as::<f64>().unwrap().to_bits(), payload.to_bits());
    assert_eq!(node, LiteralNode::double(payload));
    assert_ne!(node, LiteralNode::double(f64::NAN));
}

#[test_log::test]
fn invalid_construction_produces_no_node() {
    assert!(matches!(
        LiteralNode::decimal(1000, 3, 0),
        Err(Error::InvalidValue { .. })
    ));
    assert!(matches!(
        LiteralNode::fixed_size_binary(vec![0u8; 3], 4),
        Err(Error::InvalidValue { .. })
    ));
    assert!(matches!(
        LiteralNode::try_new(&DataType::Integer, 1i64),
        Err(Error::InvalidValue { .. })
    ));
    assert!(matches!(
        LiteralNode::parse(&DataType::Byte, "1000"),
        Err(Error::InvalidValue { .. })
    ));
    assert!(matches!(
        LiteralNode::parse(&DataType::Decimal(39, 39), "0.1"),
        Err(Error::InvalidDecimal(_))
    ));
    assert!(matches!(
        LiteralNode::null(DataType::Decimal(40, 0)),
        Err(Error::InvalidDecimal(_))
    ));
    assert!(matches!(
        LiteralNode::try_new(&DataType::Decimal(2, 0), Scalar::Decimal(1000, 2, 0)),
        Err(Error::InvalidValue { .. })
    ));
}

#[test_log::test]
fn large_json_number_converts_to_decimal_exactly() {
    let options = ConversionOptions::default();
    let node = LiteralNode::from_json(&json!({"type": "decimal(38,0)", "value": 1e20}), &options)
        .unwrap();
    assert_eq!(node.value().unwrap(), &Scalar::Decimal(10i128.pow(20), 38, 0));
    assert_eq!(node.to_string(), "100000000000000000000");
}

#[test_log::test]
fn literal_from_host_json() {
    let options = ConversionOptions::from_map(&HashMap::from([(
        "literal.string.maxLength".to_string(),
        "8".to_string(),
    )]))
    .unwrap();

    let node =
        LiteralNode::from_json_str(r#"{"type": "double", "value": 1.5}"#, &options).unwrap();
    assert_eq!(node, LiteralNode::double(1.5));
    assert_eq!(node.to_json(), json!({"type": "double", "value": 1.5}));

    let node = LiteralNode::from_json(&json!({"type": "string", "value": "short"}), &options)
        .unwrap();
    assert_eq!(node.value_as::<String>().unwrap(), "short");

    let err = LiteralNode::from_json(
        &json!({"type": "string", "value": "much too long"}),
        &options,
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidValue { .. }));
    assert_eq!(
        err.to_string(),
        "Invalid value '\"much too long\"' for literal of type 'string'"
    );
}

#[test_log::test]
fn literals_are_usable_as_shared_operands() {
    let operands = vec![
        LiteralNode::double(1.5).into_node_ref(),
        LiteralNode::integer(2).into_node_ref(),
        LiteralNode::null(DataType::Boolean).unwrap().into_node_ref(),
    ];
    let types: Vec<_> = operands.iter().map(|node| node.return_type()).collect();
    assert_eq!(
        types,
        vec![DataType::Double, DataType::Integer, DataType::Boolean]
    );
    assert!(operands
        .iter()
        .all(|node| node.as_literal().is_some()));
}
