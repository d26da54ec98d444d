//! Virtual machine and device configuration specs.

use chrono::{DateTime, Utc};
use vim_wire::{
    abstract_type, base_accessor, wire_enum, wire_type, DecodeError, EncodeError, StructReader,
    StructWriter, WireType,
};

use crate::data::OptionValue;
use crate::device::VirtualDeviceKind;
use crate::hardware_version::HardwareVersion;

wire_enum! {
    pub enum VirtualDeviceConfigSpecOperation {
        Add = "add",
        Remove = "remove",
        Edit = "edit",
    }
}

wire_enum! {
    pub enum VirtualDeviceConfigSpecFileOperation {
        Create = "create",
        Destroy = "destroy",
        Replace = "replace",
    }
}

pub trait BaseVirtualDeviceConfigSpec {
    fn get_virtual_device_config_spec(&self) -> &VirtualDeviceConfigSpec;
    fn get_virtual_device_config_spec_mut(&mut self) -> &mut VirtualDeviceConfigSpec;
}

/// One device change. `device` is required on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualDeviceConfigSpec {
    pub operation: VirtualDeviceConfigSpecOperation,
    pub file_operation: VirtualDeviceConfigSpecFileOperation,
    pub device: Option<VirtualDeviceKind>,
}

impl VirtualDeviceConfigSpec {
    pub fn add(device: impl Into<VirtualDeviceKind>) -> Self {
        Self {
            operation: VirtualDeviceConfigSpecOperation::Add,
            device: Some(device.into()),
            ..Self::default()
        }
    }
}

impl WireType for VirtualDeviceConfigSpec {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        w.omit_empty("operation", &self.operation)?;
        w.omit_empty("fileOperation", &self.file_operation)?;
        w.required("device", &self.device)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            operation: r.field("operation")?,
            file_operation: r.field("fileOperation")?,
            device: r.required("device")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualDiskConfigSpec {
    pub virtual_device_config_spec: VirtualDeviceConfigSpec,
    pub disk_move_type: String,
    pub migrate_cache: Option<bool>,
}

impl WireType for VirtualDiskConfigSpec {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        self.virtual_device_config_spec.write_fields(w)?;
        w.omit_empty("diskMoveType", &self.disk_move_type)?;
        w.field("migrateCache", &self.migrate_cache)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            virtual_device_config_spec: VirtualDeviceConfigSpec::read_fields(r)?,
            disk_move_type: r.field("diskMoveType")?,
            migrate_cache: r.field("migrateCache")?,
        })
    }
}

base_accessor!(BaseVirtualDeviceConfigSpec::{
    get_virtual_device_config_spec, get_virtual_device_config_spec_mut
} -> VirtualDeviceConfigSpec {
    VirtualDeviceConfigSpec => self;
    VirtualDiskConfigSpec => self.virtual_device_config_spec;
});

abstract_type! {
    pub enum VirtualDeviceConfigSpecKind: VirtualDeviceConfigSpec
        => BaseVirtualDeviceConfigSpec::{
            get_virtual_device_config_spec, get_virtual_device_config_spec_mut
        }
    {
        VirtualDeviceConfigSpec,
        VirtualDiskConfigSpec,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualMachineFileInfo {
    pub vm_path_name: String,
    pub snapshot_directory: String,
    pub suspend_directory: String,
    pub log_directory: String,
}

impl WireType for VirtualMachineFileInfo {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        w.omit_empty("vmPathName", &self.vm_path_name)?;
        w.omit_empty("snapshotDirectory", &self.snapshot_directory)?;
        w.omit_empty("suspendDirectory", &self.suspend_directory)?;
        w.omit_empty("logDirectory", &self.log_directory)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            vm_path_name: r.field("vmPathName")?,
            snapshot_directory: r.field("snapshotDirectory")?,
            suspend_directory: r.field("suspendDirectory")?,
            log_directory: r.field("logDirectory")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualMachineAffinityInfo {
    pub affinity_set: Vec<i32>,
}

impl WireType for VirtualMachineAffinityInfo {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        w.field("affinitySet", &self.affinity_set)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            affinity_set: r.field("affinitySet")?,
        })
    }
}

/// Changes to apply to a virtual machine. Unset fields are left alone by
/// the server.
///
/// `device_change` distinguishes "no list" from "an empty list" in memory,
/// but both travel the same way: an empty list is left off the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualMachineConfigSpec {
    pub change_version: String,
    pub name: String,
    pub version: HardwareVersion,
    pub create_date: Option<DateTime<Utc>>,
    pub uuid: String,
    pub guest_id: String,
    pub annotation: String,
    pub files: Option<VirtualMachineFileInfo>,
    pub num_cpus: i32,
    pub num_cores_per_socket: i32,
    pub memory_mb: i64,
    pub memory_hot_add_enabled: Option<bool>,
    pub cpu_hot_add_enabled: Option<bool>,
    pub cpu_affinity: Option<VirtualMachineAffinityInfo>,
    pub device_change: Option<Vec<VirtualDeviceConfigSpecKind>>,
    pub extra_config: Vec<OptionValue>,
}

impl WireType for VirtualMachineConfigSpec {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        w.omit_empty("changeVersion", &self.change_version)?;
        w.omit_empty("name", &self.name)?;
        w.omit_empty("version", &self.version)?;
        w.field("createDate", &self.create_date)?;
        w.omit_empty("uuid", &self.uuid)?;
        w.omit_empty("guestId", &self.guest_id)?;
        w.omit_empty("annotation", &self.annotation)?;
        w.field("files", &self.files)?;
        w.omit_empty("numCPUs", &self.num_cpus)?;
        w.omit_empty("numCoresPerSocket", &self.num_cores_per_socket)?;
        w.omit_empty("memoryMB", &self.memory_mb)?;
        w.field("memoryHotAddEnabled", &self.memory_hot_add_enabled)?;
        w.field("cpuHotAddEnabled", &self.cpu_hot_add_enabled)?;
        w.field("cpuAffinity", &self.cpu_affinity)?;
        w.field("deviceChange", &self.device_change)?;
        w.field("extraConfig", &self.extra_config)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            change_version: r.field("changeVersion")?,
            name: r.field("name")?,
            version: r.field("version")?,
            create_date: r.field("createDate")?,
            uuid: r.field("uuid")?,
            guest_id: r.field("guestId")?,
            annotation: r.field("annotation")?,
            files: r.field("files")?,
            num_cpus: r.field("numCPUs")?,
            num_cores_per_socket: r.field("numCoresPerSocket")?,
            memory_mb: r.field("memoryMB")?,
            memory_hot_add_enabled: r.field("memoryHotAddEnabled")?,
            cpu_hot_add_enabled: r.field("cpuHotAddEnabled")?,
            cpu_affinity: r.field("cpuAffinity")?,
            device_change: r.field("deviceChange")?,
            extra_config: r.field("extraConfig")?,
        })
    }
}

wire_type!(
    VirtualDeviceConfigSpec,
    VirtualDiskConfigSpec,
    VirtualMachineFileInfo,
    VirtualMachineAffinityInfo,
    VirtualMachineConfigSpec,
);
