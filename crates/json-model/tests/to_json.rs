use std::collections::{BTreeMap, HashMap};

use json_model::{Fields, Model, OneOf1, OneOf2, OneOf7};

#[derive(Debug, Default, PartialEq)]
struct Primitives {
    bool_field: bool,
    double_field: f64,
    int_field: i32,
    int64_field: i64,
    unsigned_field: u32,
    uint64_field: u64,
    string_field: String,
    null_field: (),
}

impl Model for Primitives {
    fn fields(fields: &mut Fields<Self>) {
        fields
            .required("bool-field", |m| &m.bool_field, |m| &mut m.bool_field)
            .required("double-field", |m| &m.double_field, |m| &mut m.double_field)
            .required("int-field", |m| &m.int_field, |m| &mut m.int_field)
            .required("int64-field", |m| &m.int64_field, |m| &mut m.int64_field)
            .required(
                "unsigned-field",
                |m| &m.unsigned_field,
                |m| &mut m.unsigned_field,
            )
            .required("uint64-field", |m| &m.uint64_field, |m| &mut m.uint64_field)
            .required("string-field", |m| &m.string_field, |m| &mut m.string_field)
            .required("null-field", |m| &m.null_field, |m| &mut m.null_field);
    }
}

#[test]
fn primitives() {
    let model = Primitives {
        bool_field: true,
        double_field: 3.1415926,
        int_field: 239,
        int64_field: i64::MAX,
        unsigned_field: 179,
        uint64_field: u64::MAX,
        string_field: "\"An algorithm must be seen to be believed.\" - Donald Knuth".to_string(),
        null_field: (),
    };
    let text = model.to_json();
    assert_eq!(
        text,
        r#"{"bool-field":true,"double-field":3.1415926,"int-field":239,"int64-field":9223372036854775807,"unsigned-field":179,"uint64-field":18446744073709551615,"string-field":"\"An algorithm must be seen to be believed.\" - Donald Knuth","null-field":null}"#
    );
    assert_eq!(Primitives::parse(&text).unwrap(), model);
}

#[test]
fn integer_extremes_round_trip() {
    let model = Primitives {
        int_field: i32::MIN,
        int64_field: i64::MIN,
        unsigned_field: u32::MAX,
        uint64_field: u64::MAX,
        ..Primitives::default()
    };
    assert_eq!(Primitives::parse(&model.to_json()).unwrap(), model);
}

#[derive(Debug, Default, PartialEq)]
struct InnerNested {
    string: String,
    null_field: (),
}

impl Model for InnerNested {
    fn fields(fields: &mut Fields<Self>) {
        fields
            .required("string", |m| &m.string, |m| &mut m.string)
            .required("null", |m| &m.null_field, |m| &mut m.null_field);
    }
}

#[derive(Debug, Default, PartialEq)]
struct Nested {
    inner: Box<InnerNested>,
}

impl Model for Nested {
    fn fields(fields: &mut Fields<Self>) {
        fields.required("inner", |m| &m.inner, |m| &mut m.inner);
    }
}

#[test]
fn nested_model() {
    let mut model = Nested::default();
    assert_eq!(model.to_json(), r#"{"inner":{"string":"","null":null}}"#);
    model.inner.string = "hello".to_string();
    assert_eq!(model.to_json(), r#"{"inner":{"string":"hello","null":null}}"#);
}

#[derive(Debug, Default, PartialEq)]
struct HighlyNested {
    nested: Option<Box<HighlyNested>>,
}

impl Model for HighlyNested {
    fn fields(fields: &mut Fields<Self>) {
        fields.optional("nested", |m| &m.nested, |m| &mut m.nested);
    }
}

#[test]
fn highly_nested_model() {
    let mut model = HighlyNested::default();
    let mut prefix = String::from("{");
    let mut suffix = String::from("}");
    assert_eq!(model.to_json(), "{}");
    for depth in 0..100 {
        let mut current = &mut model;
        for _ in 0..depth {
            current = current
                .nested
                .as_deref_mut()
                .expect("chain built by earlier iterations");
        }
        current.nested = Some(Box::default());
        prefix.push_str(r#""nested":{"#);
        suffix.push('}');
        assert_eq!(model.to_json(), format!("{}{}", prefix, suffix));
    }
    assert_eq!(HighlyNested::parse(&model.to_json()).unwrap(), model);
}

#[derive(Debug, Default, PartialEq)]
struct InnerVector {
    value: String,
}

impl Model for InnerVector {
    fn fields(fields: &mut Fields<Self>) {
        fields.required("value", |m| &m.value, |m| &mut m.value);
    }
}

#[derive(Debug, Default, PartialEq)]
struct Vectors {
    nums: Vec<i32>,
    objects: Vec<Box<InnerVector>>,
    maps: Vec<BTreeMap<String, i32>>,
    variants: Vec<OneOf2<i32, String>>,
}

impl Model for Vectors {
    fn fields(fields: &mut Fields<Self>) {
        fields
            .required("nums", |m| &m.nums, |m| &mut m.nums)
            .required("objects", |m| &m.objects, |m| &mut m.objects)
            .required("maps", |m| &m.maps, |m| &mut m.maps)
            .required("variants", |m| &m.variants, |m| &mut m.variants);
    }
}

fn int_map(entries: &[(&str, i32)]) -> BTreeMap<String, i32> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), *value))
        .collect()
}

#[test]
fn vector() {
    const N: i32 = 1000;
    let mut model = Vectors::default();
    let nums: Vec<String> = (1..=N).map(|i| i.to_string()).collect();
    let objects: Vec<String> = (1..=N)
        .rev()
        .map(|i| format!(r#"{{"value":"{}"}}"#, i))
        .collect();
    model.nums = (1..=N).collect();
    model.objects = (1..=N)
        .rev()
        .map(|i| {
            Box::new(InnerVector {
                value: i.to_string(),
            })
        })
        .collect();
    model.maps = vec![
        int_map(&[("a", 1), ("b", 2), ("c", 3)]),
        int_map(&[("d", 4), ("e", 5), ("f", 6)]),
        int_map(&[("g", 7), ("h", 8), ("i", 9)]),
    ];
    model.variants = vec![
        OneOf2::A(239),
        OneOf2::B("hello".to_string()),
        OneOf2::A(179),
        OneOf2::B("there".to_string()),
    ];
    let expected = format!(
        r#"{{"nums":[{}],"objects":[{}],"maps":[{{"a":1,"b":2,"c":3}},{{"d":4,"e":5,"f":6}},{{"g":7,"h":8,"i":9}}],"variants":[239,"hello",179,"there"]}}"#,
        nums.join(","),
        objects.join(",")
    );
    assert_eq!(model.to_json(), expected);
    assert_eq!(Vectors::parse(&expected).unwrap(), model);
}

#[derive(Debug, Default, PartialEq)]
struct InnerMap {
    value: i32,
}

impl Model for InnerMap {
    fn fields(fields: &mut Fields<Self>) {
        fields.required("value", |m| &m.value, |m| &mut m.value);
    }
}

#[derive(Debug, Default, PartialEq)]
struct Maps {
    nums: BTreeMap<String, i32>,
    objects: BTreeMap<String, Box<InnerMap>>,
    vectors: BTreeMap<String, Vec<i32>>,
    variants: BTreeMap<String, OneOf2<i32, String>>,
    nested: BTreeMap<String, BTreeMap<String, i32>>,
}

impl Model for Maps {
    fn fields(fields: &mut Fields<Self>) {
        fields
            .required("nums", |m| &m.nums, |m| &mut m.nums)
            .required("objects", |m| &m.objects, |m| &mut m.objects)
            .required("vectors", |m| &m.vectors, |m| &mut m.vectors)
            .required("variants", |m| &m.variants, |m| &mut m.variants)
            .required("nested", |m| &m.nested, |m| &mut m.nested);
    }
}

#[derive(Debug, Default, PartialEq)]
struct UnorderedMaps {
    nums: HashMap<String, i32>,
    objects: HashMap<String, Box<InnerMap>>,
    vectors: BTreeMap<String, Vec<i32>>,
    variants: BTreeMap<String, OneOf2<i32, String>>,
    nested: BTreeMap<String, BTreeMap<String, i32>>,
}

impl Model for UnorderedMaps {
    fn fields(fields: &mut Fields<Self>) {
        fields
            .required("nums", |m| &m.nums, |m| &mut m.nums)
            .required("objects", |m| &m.objects, |m| &mut m.objects)
            .required("vectors", |m| &m.vectors, |m| &mut m.vectors)
            .required("variants", |m| &m.variants, |m| &mut m.variants)
            .required("nested", |m| &m.nested, |m| &mut m.nested);
    }
}

#[test]
fn map() {
    const N: i32 = 1000;
    let mut model = Maps::default();
    let mut unordered = UnorderedMaps::default();
    let mut ordering: Vec<(String, i32)> = (1..=N).map(|i| (i.to_string(), i)).collect();
    ordering.sort();

    for (key, value) in &ordering {
        model.nums.insert(key.clone(), *value);
        unordered.nums.insert(key.clone(), *value);
        model
            .objects
            .insert(key.clone(), Box::new(InnerMap { value: *value }));
        unordered
            .objects
            .insert(key.clone(), Box::new(InnerMap { value: *value }));
    }

    let vectors: BTreeMap<String, Vec<i32>> = [
        ("a", vec![1, 2]),
        ("b", vec![0]),
        ("c", vec![3, 4, 5, 6]),
        ("d", vec![7, 8, 9]),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect();
    model.vectors = vectors.clone();
    unordered.vectors = vectors;

    let variants: BTreeMap<String, OneOf2<i32, String>> = [
        ("hello", OneOf2::B("there".to_string())),
        ("239", OneOf2::A(179)),
        ("ok", OneOf2::B("google".to_string())),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect();
    model.variants = variants.clone();
    unordered.variants = variants;

    let nested: BTreeMap<String, BTreeMap<String, i32>> = [
        ("hello", int_map(&[("there", 1), ("world", 2)])),
        ("123", int_map(&[("1", 1), ("2", 2), ("3", 3)])),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect();
    model.nested = nested.clone();
    unordered.nested = nested;

    let nums: Vec<String> = ordering
        .iter()
        .map(|(key, _)| format!(r#""{}":{}"#, key, key))
        .collect();
    let objects: Vec<String> = ordering
        .iter()
        .map(|(key, _)| format!(r#""{}":{{"value":{}}}"#, key, key))
        .collect();
    let expected = format!(
        r#"{{"nums":{{{}}},"objects":{{{}}},"vectors":{{"a":[1,2],"b":[0],"c":[3,4,5,6],"d":[7,8,9]}},"variants":{{"239":179,"hello":"there","ok":"google"}},"nested":{{"123":{{"1":1,"2":2,"3":3}},"hello":{{"there":1,"world":2}}}}}}"#,
        nums.join(","),
        objects.join(",")
    );
    assert_eq!(model.to_json(), expected);

    let mut ordered_chars: Vec<char> = model.to_json().chars().collect();
    let mut unordered_chars: Vec<char> = unordered.to_json().chars().collect();
    ordered_chars.sort_unstable();
    unordered_chars.sort_unstable();
    assert_eq!(ordered_chars, unordered_chars);

    assert_eq!(UnorderedMaps::parse(&unordered.to_json()).unwrap(), unordered);
}

#[derive(Debug, Default, PartialEq)]
struct NestedVectors {
    vector: Vec<Vec<Vec<Vec<Vec<Vec<Vec<Vec<Vec<Vec<i32>>>>>>>>>>,
}

impl Model for NestedVectors {
    fn fields(fields: &mut Fields<Self>) {
        fields.required("vector", |m| &m.vector, |m| &mut m.vector);
    }
}

fn expected_tree(depth: usize, next: &mut i32) -> String {
    if depth == 0 {
        let value = *next;
        *next += 1;
        return value.to_string();
    }
    let first = expected_tree(depth - 1, next);
    let second = expected_tree(depth - 1, next);
    format!("[{},{}]", first, second)
}

#[test]
fn nested_vector() {
    let text = format!(r#"{{"vector":{}}}"#, expected_tree(10, &mut 0));
    let model = NestedVectors::parse(&text).unwrap();
    assert_eq!(model.vector[1][1][1][1][1][1][1][1][1][1], 1023);
    assert_eq!(model.to_json(), text);
}

#[derive(Debug, Default, Clone, PartialEq)]
struct InnerVariant {
    string: String,
}

impl Model for InnerVariant {
    fn fields(fields: &mut Fields<Self>) {
        fields.required("string", |m| &m.string, |m| &mut m.string);
    }
}

#[derive(Debug, Default, PartialEq)]
struct Variants {
    var: OneOf7<
        Box<InnerVariant>,
        bool,
        i32,
        String,
        (),
        Vec<i32>,
        BTreeMap<String, String>,
    >,
}

impl Model for Variants {
    fn fields(fields: &mut Fields<Self>) {
        fields.required("var", |m| &m.var, |m| &mut m.var);
    }
}

#[derive(Debug, Default, PartialEq)]
struct PrimitiveVariant {
    var: OneOf1<i32>,
}

impl Model for PrimitiveVariant {
    fn fields(fields: &mut Fields<Self>) {
        fields.required("var", |m| &m.var, |m| &mut m.var);
    }
}

#[test]
fn variant() {
    let mut model = Variants::default();
    assert_eq!(model.var.index(), 0);
    assert_eq!(model.to_json(), r#"{"var":{"string":""}}"#);
    model.var = OneOf7::B(true);
    assert_eq!(model.to_json(), r#"{"var":true}"#);
    model.var = OneOf7::C(239);
    assert_eq!(model.to_json(), r#"{"var":239}"#);
    model.var = OneOf7::D("hello".to_string());
    assert_eq!(model.to_json(), r#"{"var":"hello"}"#);
    model.var = OneOf7::E(());
    assert_eq!(model.to_json(), r#"{"var":null}"#);
    model.var = OneOf7::F(vec![1, 2, 3, 4]);
    assert_eq!(model.to_json(), r#"{"var":[1,2,3,4]}"#);
    model.var = OneOf7::G(
        [("hello", "there"), ("239", "179")]
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect(),
    );
    assert_eq!(model.to_json(), r#"{"var":{"239":"179","hello":"there"}}"#);
    model.var = OneOf7::A(Box::new(InnerVariant {
        string: "hello".to_string(),
    }));
    assert_eq!(model.to_json(), r#"{"var":{"string":"hello"}}"#);

    assert_eq!(PrimitiveVariant::default().to_json(), r#"{"var":0}"#);
}

#[test]
fn non_finite_double_is_null() {
    let model = Primitives {
        double_field: f64::INFINITY,
        ..Primitives::default()
    };
    assert!(model.to_json().contains(r#""double-field":null"#));
}
