#![allow(dead_code)]

use vim_wire_types::*;

/// A controller, a thin disk on it and a NIC, plus one extra config entry.
pub fn config_spec() -> VirtualMachineConfigSpec {
    let controller = VirtualLsiLogicController {
        virtual_scsi_controller: VirtualSCSIController {
            virtual_controller: VirtualController {
                virtual_device: VirtualDevice {
                    key: 1000,
                    ..VirtualDevice::default()
                },
                bus_number: 0,
                ..VirtualController::default()
            },
            shared_bus: VirtualSCSISharing::NoSharing,
            ..VirtualSCSIController::default()
        },
    };

    let disk = VirtualDisk {
        virtual_device: VirtualDevice {
            key: 0,
            controller_key: 1000,
            unit_number: Some(10),
            backing: Some(
                VirtualDiskFlatVer2BackingInfo {
                    virtual_device_file_backing_info: VirtualDeviceFileBackingInfo {
                        file_name: "[datastore1]".into(),
                        ..VirtualDeviceFileBackingInfo::default()
                    },
                    disk_mode: VirtualDiskMode::Persistent.as_str().to_owned(),
                    thin_provisioned: Some(true),
                    ..VirtualDiskFlatVer2BackingInfo::default()
                }
                .into(),
            ),
            ..VirtualDevice::default()
        },
        capacity_in_kb: 4_000_000,
        ..VirtualDisk::default()
    };

    let nic = VirtualE1000 {
        virtual_ethernet_card: VirtualEthernetCard {
            virtual_device: VirtualDevice {
                key: 0,
                device_info: Some(Description {
                    label: "Network Adapter 1".into(),
                    summary: "VM Network".into(),
                }),
                backing: Some(
                    VirtualEthernetCardNetworkBackingInfo {
                        virtual_device_device_backing_info: VirtualDeviceDeviceBackingInfo {
                            device_name: "VM Network".into(),
                            ..VirtualDeviceDeviceBackingInfo::default()
                        },
                        ..VirtualEthernetCardNetworkBackingInfo::default()
                    }
                    .into(),
                ),
                ..VirtualDevice::default()
            },
            address_type: VirtualEthernetCardMacType::Generated.as_str().to_owned(),
            ..VirtualEthernetCard::default()
        },
    };

    VirtualMachineConfigSpec {
        name: "vm-001".into(),
        guest_id: "otherGuest".into(),
        files: Some(VirtualMachineFileInfo {
            vm_path_name: "[datastore1]".into(),
            ..VirtualMachineFileInfo::default()
        }),
        num_cpus: 1,
        memory_mb: 128,
        device_change: Some(vec![
            VirtualDeviceConfigSpec::add(controller).into(),
            VirtualDeviceConfigSpec {
                file_operation: VirtualDeviceConfigSpecFileOperation::Create,
                ..VirtualDeviceConfigSpec::add(disk)
            }
            .into(),
            VirtualDeviceConfigSpec::add(nic).into(),
        ]),
        extra_config: vec![OptionValue::new("bios.bootOrder", "ethernet0")],
        ..VirtualMachineConfigSpec::default()
    }
}

pub fn vm(value: &str) -> ManagedObjectReference {
    ManagedObjectReference::new("VirtualMachine", value)
}
