const PROTO_DIR: &str = "protos";
const PROTO_FILES: [&str; 1] = ["protos/ag.proto"];

// every message and enum can be serialized and faked for the mock portal
const MESSAGE_DERIVES: [&str; 3] = ["::serde::Serialize", "::serde::Deserialize", "::fake::Dummy"];

// status enums are parsed from forms and shown by name
const ENUM_DERIVES: [&str; 3] = [
    "::strum_macros::EnumString",
    "::strum_macros::Display",
    "::strum_macros::EnumIter",
];
const ENUMS: [&str; 6] = [
    "ag.Group.GroupStatus",
    "ag.Enrollment.UserStatus",
    "ag.Enrollment.DisplayState",
    "ag.Submission.Status",
    "ag.SubmissionsForCourseRequest.Type",
    "ag.GradingCriterion.Grade",
];

fn derive(paths: &[&str]) -> String {
    format!("#[derive({})]", paths.join(","))
}

fn prost_config() -> prost_build::Config {
    let mut config = prost_build::Config::new();
    // `Dummy` expands to code naming `fake` items unqualified
    config.type_attribute(
        ".",
        format!("#[allow(unused_imports)]\nuse fake::*;\n{}", derive(&MESSAGE_DERIVES)),
    );
    let enum_derives = derive(&ENUM_DERIVES);
    for path in ENUMS.iter() {
        config.type_attribute(path, &enum_derives);
    }
    config
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    for file in PROTO_FILES.iter() {
        println!("cargo:rerun-if-changed={}", file);
    }
    tonic_build::configure()
        .build_client(true)
        .build_server(true)
        .compile_with_config(prost_config(), &PROTO_FILES, &[PROTO_DIR])?;
    Ok(())
}
