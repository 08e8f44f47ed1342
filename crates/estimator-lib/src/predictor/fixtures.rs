//! Small ONNX graphs for inference tests
//!
//! Encodes `price = features · weights + bias` as a `MatMul` followed by an
//! `Add` over a `[1, 12]` float input, written straight to protobuf wire
//! format.

use crate::models::FeatureRecord;
use crate::schema::NUM_FEATURES;

const WIRE_VARINT: u64 = 0;
const WIRE_LEN: u64 = 2;
const ONNX_FLOAT: u64 = 1;

fn varint(out: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        out.push((value as u8) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

fn int_field(out: &mut Vec<u8>, field: u64, value: u64) {
    varint(out, (field << 3) | WIRE_VARINT);
    varint(out, value);
}

fn bytes_field(out: &mut Vec<u8>, field: u64, bytes: &[u8]) {
    varint(out, (field << 3) | WIRE_LEN);
    varint(out, bytes.len() as u64);
    out.extend_from_slice(bytes);
}

/// TensorProto holding float data
fn tensor(name: &str, dims: &[u64], values: &[f32]) -> Vec<u8> {
    let mut out = Vec::new();
    for dim in dims {
        int_field(&mut out, 1, *dim);
    }
    int_field(&mut out, 2, ONNX_FLOAT);
    bytes_field(&mut out, 8, name.as_bytes());
    let raw: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    bytes_field(&mut out, 9, &raw);
    out
}

/// ValueInfoProto for a float tensor of fixed shape
fn value_info(name: &str, dims: &[u64]) -> Vec<u8> {
    let mut shape = Vec::new();
    for dim in dims {
        let mut dimension = Vec::new();
        int_field(&mut dimension, 1, *dim);
        bytes_field(&mut shape, 1, &dimension);
    }

    let mut tensor_type = Vec::new();
    int_field(&mut tensor_type, 1, ONNX_FLOAT);
    bytes_field(&mut tensor_type, 2, &shape);

    let mut type_proto = Vec::new();
    bytes_field(&mut type_proto, 1, &tensor_type);

    let mut out = Vec::new();
    bytes_field(&mut out, 1, name.as_bytes());
    bytes_field(&mut out, 2, &type_proto);
    out
}

fn node(op_type: &str, inputs: &[&str], output: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for input in inputs {
        bytes_field(&mut out, 1, input.as_bytes());
    }
    bytes_field(&mut out, 2, output.as_bytes());
    bytes_field(&mut out, 3, op_type.to_lowercase().as_bytes());
    bytes_field(&mut out, 4, op_type.as_bytes());
    out
}

/// Serialized ModelProto for a linear price model
pub(crate) fn linear_onnx_graph(weights: &[f32; NUM_FEATURES], bias: f32) -> Vec<u8> {
    let features = NUM_FEATURES as u64;

    let mut graph = Vec::new();
    bytes_field(&mut graph, 1, &node("MatMul", &["features", "weights"], "scaled"));
    bytes_field(&mut graph, 1, &node("Add", &["scaled", "bias"], "price"));
    bytes_field(&mut graph, 2, b"house_pred");
    bytes_field(&mut graph, 5, &tensor("weights", &[features, 1], weights));
    bytes_field(&mut graph, 5, &tensor("bias", &[1], &[bias]));
    bytes_field(&mut graph, 11, &value_info("features", &[1, features]));
    bytes_field(&mut graph, 12, &value_info("price", &[1, 1]));

    let mut opset = Vec::new();
    bytes_field(&mut opset, 1, b"");
    int_field(&mut opset, 2, 13);

    let mut model = Vec::new();
    int_field(&mut model, 1, 7);
    bytes_field(&mut model, 2, b"estimator-lib-tests");
    bytes_field(&mut model, 7, &graph);
    bytes_field(&mut model, 8, &opset);
    model
}

/// Expected output of [`linear_onnx_graph`] for a record
pub(crate) fn dot(weights: &[f32; NUM_FEATURES], bias: f32, record: &FeatureRecord) -> f64 {
    record
        .to_features()
        .iter()
        .zip(weights.iter())
        .fold(bias as f64, |acc, (x, w)| acc + *x as f64 * *w as f64)
}
