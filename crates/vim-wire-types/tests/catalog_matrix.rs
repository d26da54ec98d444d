mod common;

use serde_json::json;
use vim_wire::{AnyType, CopyError, DecodeError, EncodeError};
use vim_wire_types::*;

use common::{config_spec, vm};

#[test]
fn managed_object_reference_wire_forms() {
    let cases = [
        (
            ManagedObjectReference {
                type_: "fake".into(),
                value: "fake".into(),
                server_guid: "fake".into(),
            },
            r#"<ManagedObjectReference type="fake" serverGuid="fake">fake</ManagedObjectReference>"#,
            json!({"_typeName": "ManagedObjectReference", "type": "fake", "value": "fake", "serverGuid": "fake"}),
        ),
        (
            ManagedObjectReference::new("fake", "fake"),
            r#"<ManagedObjectReference type="fake">fake</ManagedObjectReference>"#,
            json!({"_typeName": "ManagedObjectReference", "type": "fake", "value": "fake"}),
        ),
    ];
    for (reference, expected_xml, expected_json) in cases {
        let text = to_xml(&reference).unwrap();
        assert_eq!(text, expected_xml);
        assert_eq!(from_xml::<ManagedObjectReference>(&text).unwrap(), reference);

        let text = to_json(&reference).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, expected_json);
        assert_eq!(from_json::<ManagedObjectReference>(&text).unwrap(), reference);
    }
}

#[test]
fn config_spec_json_matches_the_reference_layout() {
    let spec = VirtualMachineConfigSpec {
        name: "Hello, world.".into(),
        device_change: Some(vec![VirtualDeviceConfigSpec {
            operation: VirtualDeviceConfigSpecOperation::Add,
            file_operation: VirtualDeviceConfigSpecFileOperation::Create,
            device: Some(
                VirtualVmxnet3 {
                    virtual_vmxnet: VirtualVmxnet {
                        virtual_ethernet_card: VirtualEthernetCard {
                            virtual_device: VirtualDevice {
                                key: 3,
                                ..VirtualDevice::default()
                            },
                            mac_address: "00:11:22:33:44:55:66:88".into(),
                            ..VirtualEthernetCard::default()
                        },
                    },
                    ..VirtualVmxnet3::default()
                }
                .into(),
            ),
        }
        .into()]),
        ..VirtualMachineConfigSpec::default()
    };
    let expected = r#"{
  "_typeName": "VirtualMachineConfigSpec",
  "name": "Hello, world.",
  "deviceChange": [
    {
      "_typeName": "VirtualDeviceConfigSpec",
      "operation": "add",
      "fileOperation": "create",
      "device": {
        "_typeName": "VirtualVmxnet3",
        "key": 3,
        "macAddress": "00:11:22:33:44:55:66:88"
      }
    }
  ]
}"#;
    let text = to_json_pretty(&spec).unwrap();
    assert_eq!(text, expected);

    let back: VirtualMachineConfigSpec = from_json(&text).unwrap();
    assert_eq!(back, spec);
    let Some(VirtualDeviceConfigSpecKind::VirtualDeviceConfigSpec(change)) =
        back.device_change.as_ref().and_then(|changes| changes.first())
    else {
        panic!("expected one device change");
    };
    let device = change.device.as_ref().unwrap();
    assert!(matches!(device, VirtualDeviceKind::VirtualVmxnet3(_)));
    assert_eq!(device.get_virtual_device().key, 3);
}

#[test]
fn config_spec_round_trips_in_both_formats() {
    let spec = config_spec();

    let text = to_xml(&spec).unwrap();
    assert!(text.contains(r#"<deviceChange xsi:type="VirtualDeviceConfigSpec">"#), "{text}");
    assert!(text.contains(r#"<device xsi:type="VirtualLsiLogicController">"#), "{text}");
    assert!(text.contains(r#"<backing xsi:type="VirtualDiskFlatVer2BackingInfo">"#), "{text}");
    assert!(text.contains("<numCPUs>1</numCPUs><memoryMB>128</memoryMB>"), "{text}");
    assert!(
        text.contains(r#"<value xsi:type="xsd:string">ethernet0</value>"#),
        "{text}"
    );
    assert_eq!(from_xml::<VirtualMachineConfigSpec>(&text).unwrap(), spec);

    let text = to_json(&spec).unwrap();
    assert_eq!(from_json::<VirtualMachineConfigSpec>(&text).unwrap(), spec);
}

#[test]
fn device_is_required_in_a_device_change() {
    let document = json!({
        "_typeName": "VirtualMachineConfigSpec",
        "deviceChange": [{"_typeName": "VirtualDeviceConfigSpec", "operation": "add"}]
    });
    let err = from_json::<VirtualMachineConfigSpec>(&document.to_string()).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::MissingField { ref field, ref path } if field == "device" && path == "$.deviceChange[0]"
    ));
}

#[test]
fn device_kinds_must_match_the_declared_base() {
    let document = json!({
        "_typeName": "VirtualDeviceConfigSpec",
        "device": {"_typeName": "VirtualDiskFlatVer2BackingInfo", "fileName": "[ds]"}
    });
    let err = from_json::<VirtualDeviceConfigSpec>(&document.to_string()).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::TypeMismatch { ref expected, ref found, .. }
            if expected == "VirtualDevice" && found == "VirtualDiskFlatVer2BackingInfo"
    ));
}

#[test]
fn affinity_set_survives_xml() {
    let info = VirtualMachineAffinityInfo {
        affinity_set: vec![0, 1, 2, 3],
    };
    let text = to_xml(&info).unwrap();
    assert_eq!(
        text,
        concat!(
            "<VirtualMachineAffinityInfo><affinitySet>0</affinitySet><affinitySet>1</affinitySet>",
            "<affinitySet>2</affinitySet><affinitySet>3</affinitySet></VirtualMachineAffinityInfo>"
        )
    );
    assert_eq!(from_xml::<VirtualMachineAffinityInfo>(&text).unwrap(), info);
}

#[test]
fn hardware_version_travels_as_its_string() {
    let spec = VirtualMachineConfigSpec {
        version: HardwareVersion::new(20),
        ..VirtualMachineConfigSpec::default()
    };
    let value: serde_json::Value = serde_json::from_str(&to_json(&spec).unwrap()).unwrap();
    assert_eq!(value, json!({"_typeName": "VirtualMachineConfigSpec", "version": "vmx-20"}));

    let back: VirtualMachineConfigSpec =
        from_xml("<VirtualMachineConfigSpec><version>vmx-99</version></VirtualMachineConfigSpec>")
            .unwrap();
    assert_eq!(back.version.as_str(), "vmx-99");
    assert_eq!(back.version.number(), Some(99));
}

fn rules() -> Vec<ClusterRuleInfoKind> {
    vec![
        ClusterAffinityRuleSpec {
            cluster_rule_info: ClusterRuleInfo {
                key: Some(1),
                name: "together".into(),
                enabled: Some(true),
                ..ClusterRuleInfo::default()
            },
            vm: vec![vm("vm-1"), vm("vm-2")],
        }
        .into(),
        ClusterAntiAffinityRuleSpec {
            cluster_rule_info: ClusterRuleInfo {
                key: Some(2),
                name: "apart".into(),
                status: ManagedEntityStatus::Green,
                ..ClusterRuleInfo::default()
            },
            vm: vec![vm("vm-3")],
        }
        .into(),
    ]
}

#[test]
fn polymorphic_rule_arrays_use_the_base_wrapper() {
    let property = DynamicProperty {
        name: "configurationEx.rule".into(),
        val: Some(AnyType::array(rules())),
    };

    let value: serde_json::Value = serde_json::from_str(&to_json(&property).unwrap()).unwrap();
    assert_eq!(value["val"]["_typeName"], "ArrayOfClusterRuleInfo");
    assert_eq!(value["val"]["_value"][0]["_typeName"], "ClusterAffinityRuleSpec");
    assert_eq!(value["val"]["_value"][1]["_typeName"], "ClusterAntiAffinityRuleSpec");
    assert_eq!(value["val"]["_value"][1]["status"], "green");

    let text = to_xml(&property).unwrap();
    assert!(text.contains(r#"<val xsi:type="ArrayOfClusterRuleInfo">"#), "{text}");
    assert!(
        text.contains(r#"<ClusterRuleInfo xsi:type="ClusterAffinityRuleSpec">"#),
        "{text}"
    );
    assert!(text.contains(r#"<vm type="VirtualMachine">vm-1</vm>"#), "{text}");

    for back in [
        from_xml::<DynamicProperty>(&text).unwrap(),
        from_json::<DynamicProperty>(&to_json(&property).unwrap()).unwrap(),
    ] {
        let items = back.val.as_ref().and_then(AnyType::as_array::<ClusterRuleInfoKind>).unwrap();
        assert_eq!(items.len(), 2);
        assert!(matches!(items[0], ClusterRuleInfoKind::ClusterAffinityRuleSpec(_)));
        assert!(matches!(items[1], ClusterRuleInfoKind::ClusterAntiAffinityRuleSpec(_)));
        assert_eq!(items[1].get_cluster_rule_info().name, "apart");
        assert_eq!(back, property);
    }
}

#[test]
fn rule_specs_carry_their_operation() {
    let specs = vec![ClusterRuleSpec::add(rules().remove(0)), ClusterRuleSpec::remove(7)];
    let property = DynamicProperty {
        name: "ruleSpec".into(),
        val: Some(AnyType::array(specs.clone())),
    };
    let text = to_xml(&property).unwrap();
    assert!(text.contains(r#"<val xsi:type="ArrayOfClusterRuleSpec">"#), "{text}");
    assert!(text.contains(r#"<removeKey xsi:type="xsd:int">7</removeKey>"#), "{text}");
    let back = from_xml::<DynamicProperty>(&text).unwrap();
    assert_eq!(back.val.as_ref().and_then(AnyType::as_array::<ClusterRuleSpec>), Some(&specs[..]));
    assert_eq!(specs[1].remove_key.as_ref().and_then(AnyType::to_primitive::<i32>), Some(7));
}

#[test]
fn property_values_are_required() {
    let err = from_json::<DynamicProperty>(r#"{"_typeName":"DynamicProperty","name":"x"}"#)
        .unwrap_err();
    assert!(matches!(err, DecodeError::MissingField { ref field, .. } if field == "val"));

    let property: DynamicProperty =
        from_json(r#"{"_typeName":"DynamicProperty","name":"x","val":5}"#).unwrap();
    assert_eq!(property.val.and_then(|v| v.to_primitive::<i64>()), Some(5));
}

#[test]
fn unknown_enum_values_round_trip() {
    let mut spec = config_spec();
    if let Some(changes) = spec.device_change.as_mut() {
        changes[0].get_virtual_device_config_spec_mut().operation =
            VirtualDeviceConfigSpecOperation::from("replaceLater");
    }
    let back: VirtualMachineConfigSpec = from_json(&to_json(&spec).unwrap()).unwrap();
    let changes = back.device_change.unwrap();
    assert_eq!(
        changes[0].get_virtual_device_config_spec().operation,
        VirtualDeviceConfigSpecOperation::Unknown("replaceLater".into())
    );
}

#[test]
fn non_finite_option_values_survive_json() {
    let infinite = OptionValue::new("limit", f64::INFINITY);
    let text = to_json(&infinite).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        value,
        json!({"_typeName": "OptionValue", "key": "limit", "value": {"_typeName": "double", "_value": "INF"}})
    );
    assert_eq!(from_json::<OptionValue>(&text).unwrap(), infinite);

    let back: OptionValue = from_json(&to_json(&OptionValue::new("ratio", f32::NAN)).unwrap()).unwrap();
    let ratio = back.value.as_ref().and_then(AnyType::to_primitive::<f32>).unwrap();
    assert!(ratio.is_nan());

    let floor = OptionValue::new("floor", f64::NEG_INFINITY);
    assert_eq!(from_xml::<OptionValue>(&to_xml(&floor).unwrap()).unwrap(), floor);
    assert_eq!(from_json::<OptionValue>(&to_json(&floor).unwrap()).unwrap(), floor);
}

#[test]
fn unset_required_fields_fail_to_encode() {
    let property = DynamicProperty {
        name: "x".into(),
        val: None,
    };
    let err = to_json(&property).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::MissingField { ref field, ref type_name } if field == "val" && type_name == "DynamicProperty"
    ));
    assert!(matches!(
        to_xml(&KeyAnyValue::default()).unwrap_err(),
        EncodeError::MissingField { ref field, .. } if field == "value"
    ));
    assert!(matches!(
        deep_copy(&property).unwrap_err(),
        CopyError::Encode(EncodeError::MissingField { .. })
    ));

    let mut spec = config_spec();
    if let Some(changes) = spec.device_change.as_mut() {
        changes[2].get_virtual_device_config_spec_mut().device = None;
    }
    let err = to_xml(&spec).unwrap_err();
    assert_eq!(
        err.to_string(),
        "required field `device` of `VirtualDeviceConfigSpec` is unset"
    );
}
