//! Virtual devices and their backings.
//!
//! Each abstract device type has a `Base*` accessor trait and a `*Kind` enum
//! holding any of its concrete subtypes. Subtypes embed their parent type as
//! their first field and write its fields before their own, so the wire form
//! is flat.

use vim_wire::{
    abstract_type, base_accessor, wire_enum, wire_type, DecodeError, EncodeError, StructReader,
    StructWriter, WireType,
};

use crate::data::{Description, ManagedObjectReference};

wire_enum! {
    pub enum VirtualDiskMode {
        Persistent = "persistent",
        Nonpersistent = "nonpersistent",
        Undoable = "undoable",
        IndependentPersistent = "independent_persistent",
        IndependentNonpersistent = "independent_nonpersistent",
        Append = "append",
    }
}

wire_enum! {
    pub enum VirtualSCSISharing {
        NoSharing = "noSharing",
        VirtualSharing = "virtualSharing",
        PhysicalSharing = "physicalSharing",
    }
}

wire_enum! {
    pub enum VirtualEthernetCardMacType {
        Manual = "manual",
        Generated = "generated",
        Assigned = "assigned",
    }
}

// Backings.

pub trait BaseVirtualDeviceBackingInfo {
    fn get_virtual_device_backing_info(&self) -> &VirtualDeviceBackingInfo;
    fn get_virtual_device_backing_info_mut(&mut self) -> &mut VirtualDeviceBackingInfo;
}

pub trait BaseVirtualDeviceFileBackingInfo {
    fn get_virtual_device_file_backing_info(&self) -> &VirtualDeviceFileBackingInfo;
    fn get_virtual_device_file_backing_info_mut(&mut self) -> &mut VirtualDeviceFileBackingInfo;
}

pub trait BaseVirtualDeviceDeviceBackingInfo {
    fn get_virtual_device_device_backing_info(&self) -> &VirtualDeviceDeviceBackingInfo;
    fn get_virtual_device_device_backing_info_mut(
        &mut self,
    ) -> &mut VirtualDeviceDeviceBackingInfo;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualDeviceBackingInfo {}

impl WireType for VirtualDeviceBackingInfo {
    fn write_fields(&self, _w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        Ok(())
    }

    fn read_fields(_r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {})
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualDeviceFileBackingInfo {
    pub virtual_device_backing_info: VirtualDeviceBackingInfo,
    pub file_name: String,
    pub datastore: Option<ManagedObjectReference>,
    pub backing_object_id: String,
}

impl WireType for VirtualDeviceFileBackingInfo {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        self.virtual_device_backing_info.write_fields(w)?;
        w.field("fileName", &self.file_name)?;
        w.field("datastore", &self.datastore)?;
        w.omit_empty("backingObjectId", &self.backing_object_id)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            virtual_device_backing_info: VirtualDeviceBackingInfo::read_fields(r)?,
            file_name: r.field("fileName")?,
            datastore: r.field("datastore")?,
            backing_object_id: r.field("backingObjectId")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualDiskFlatVer2BackingInfo {
    pub virtual_device_file_backing_info: VirtualDeviceFileBackingInfo,
    pub disk_mode: String,
    pub split: Option<bool>,
    pub write_through: Option<bool>,
    pub thin_provisioned: Option<bool>,
    pub eagerly_scrub: Option<bool>,
    pub uuid: String,
    pub parent: Option<Box<VirtualDiskFlatVer2BackingInfo>>,
}

impl WireType for VirtualDiskFlatVer2BackingInfo {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        self.virtual_device_file_backing_info.write_fields(w)?;
        w.field("diskMode", &self.disk_mode)?;
        w.field("split", &self.split)?;
        w.field("writeThrough", &self.write_through)?;
        w.field("thinProvisioned", &self.thin_provisioned)?;
        w.field("eagerlyScrub", &self.eagerly_scrub)?;
        w.omit_empty("uuid", &self.uuid)?;
        w.field("parent", &self.parent)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            virtual_device_file_backing_info: VirtualDeviceFileBackingInfo::read_fields(r)?,
            disk_mode: r.field("diskMode")?,
            split: r.field("split")?,
            write_through: r.field("writeThrough")?,
            thin_provisioned: r.field("thinProvisioned")?,
            eagerly_scrub: r.field("eagerlyScrub")?,
            uuid: r.field("uuid")?,
            parent: r.field("parent")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualDeviceDeviceBackingInfo {
    pub virtual_device_backing_info: VirtualDeviceBackingInfo,
    pub device_name: String,
    pub use_auto_detect: Option<bool>,
}

impl WireType for VirtualDeviceDeviceBackingInfo {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        self.virtual_device_backing_info.write_fields(w)?;
        w.field("deviceName", &self.device_name)?;
        w.field("useAutoDetect", &self.use_auto_detect)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            virtual_device_backing_info: VirtualDeviceBackingInfo::read_fields(r)?,
            device_name: r.field("deviceName")?,
            use_auto_detect: r.field("useAutoDetect")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualEthernetCardNetworkBackingInfo {
    pub virtual_device_device_backing_info: VirtualDeviceDeviceBackingInfo,
    pub network: Option<ManagedObjectReference>,
    pub in_passthrough_mode: Option<bool>,
}

impl WireType for VirtualEthernetCardNetworkBackingInfo {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        self.virtual_device_device_backing_info.write_fields(w)?;
        w.field("network", &self.network)?;
        w.field("inPassthroughMode", &self.in_passthrough_mode)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            virtual_device_device_backing_info: VirtualDeviceDeviceBackingInfo::read_fields(r)?,
            network: r.field("network")?,
            in_passthrough_mode: r.field("inPassthroughMode")?,
        })
    }
}

base_accessor!(BaseVirtualDeviceBackingInfo::{
    get_virtual_device_backing_info, get_virtual_device_backing_info_mut
} -> VirtualDeviceBackingInfo {
    VirtualDeviceBackingInfo => self;
    VirtualDeviceFileBackingInfo => self.virtual_device_backing_info;
    VirtualDiskFlatVer2BackingInfo => self.virtual_device_file_backing_info.virtual_device_backing_info;
    VirtualDeviceDeviceBackingInfo => self.virtual_device_backing_info;
    VirtualEthernetCardNetworkBackingInfo => self.virtual_device_device_backing_info.virtual_device_backing_info;
});

base_accessor!(BaseVirtualDeviceFileBackingInfo::{
    get_virtual_device_file_backing_info, get_virtual_device_file_backing_info_mut
} -> VirtualDeviceFileBackingInfo {
    VirtualDeviceFileBackingInfo => self;
    VirtualDiskFlatVer2BackingInfo => self.virtual_device_file_backing_info;
});

base_accessor!(BaseVirtualDeviceDeviceBackingInfo::{
    get_virtual_device_device_backing_info, get_virtual_device_device_backing_info_mut
} -> VirtualDeviceDeviceBackingInfo {
    VirtualDeviceDeviceBackingInfo => self;
    VirtualEthernetCardNetworkBackingInfo => self.virtual_device_device_backing_info;
});

abstract_type! {
    pub enum VirtualDeviceBackingInfoKind: VirtualDeviceBackingInfo
        => BaseVirtualDeviceBackingInfo::{
            get_virtual_device_backing_info, get_virtual_device_backing_info_mut
        }
    {
        VirtualDeviceBackingInfo,
        VirtualDeviceFileBackingInfo,
        VirtualDiskFlatVer2BackingInfo,
        VirtualDeviceDeviceBackingInfo,
        VirtualEthernetCardNetworkBackingInfo,
    }
}

// Devices.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualDeviceConnectInfo {
    pub migrate_connect: String,
    pub start_connected: bool,
    pub allow_guest_control: bool,
    pub connected: bool,
    pub status: String,
}

impl WireType for VirtualDeviceConnectInfo {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        w.omit_empty("migrateConnect", &self.migrate_connect)?;
        w.field("startConnected", &self.start_connected)?;
        w.field("allowGuestControl", &self.allow_guest_control)?;
        w.field("connected", &self.connected)?;
        w.omit_empty("status", &self.status)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            migrate_connect: r.field("migrateConnect")?,
            start_connected: r.field("startConnected")?,
            allow_guest_control: r.field("allowGuestControl")?,
            connected: r.field("connected")?,
            status: r.field("status")?,
        })
    }
}

pub trait BaseVirtualDevice {
    fn get_virtual_device(&self) -> &VirtualDevice;
    fn get_virtual_device_mut(&mut self) -> &mut VirtualDevice;
}

pub trait BaseVirtualController {
    fn get_virtual_controller(&self) -> &VirtualController;
    fn get_virtual_controller_mut(&mut self) -> &mut VirtualController;
}

pub trait BaseVirtualSCSIController {
    fn get_virtual_scsi_controller(&self) -> &VirtualSCSIController;
    fn get_virtual_scsi_controller_mut(&mut self) -> &mut VirtualSCSIController;
}

pub trait BaseVirtualEthernetCard {
    fn get_virtual_ethernet_card(&self) -> &VirtualEthernetCard;
    fn get_virtual_ethernet_card_mut(&mut self) -> &mut VirtualEthernetCard;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualDevice {
    pub key: i32,
    pub device_info: Option<Description>,
    pub backing: Option<VirtualDeviceBackingInfoKind>,
    pub connectable: Option<VirtualDeviceConnectInfo>,
    pub controller_key: i32,
    pub unit_number: Option<i32>,
}

impl WireType for VirtualDevice {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        w.field("key", &self.key)?;
        w.field("deviceInfo", &self.device_info)?;
        w.field("backing", &self.backing)?;
        w.field("connectable", &self.connectable)?;
        w.omit_empty("controllerKey", &self.controller_key)?;
        w.field("unitNumber", &self.unit_number)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            key: r.field("key")?,
            device_info: r.field("deviceInfo")?,
            backing: r.field("backing")?,
            connectable: r.field("connectable")?,
            controller_key: r.field("controllerKey")?,
            unit_number: r.field("unitNumber")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualController {
    pub virtual_device: VirtualDevice,
    pub bus_number: i32,
    /// Keys of the devices attached to this controller.
    pub device: Vec<i32>,
}

impl WireType for VirtualController {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        self.virtual_device.write_fields(w)?;
        w.field("busNumber", &self.bus_number)?;
        w.field("device", &self.device)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            virtual_device: VirtualDevice::read_fields(r)?,
            bus_number: r.field("busNumber")?,
            device: r.field("device")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualSCSIController {
    pub virtual_controller: VirtualController,
    pub hot_add_remove: Option<bool>,
    pub shared_bus: VirtualSCSISharing,
    pub scsi_ctlr_unit_number: i32,
}

impl WireType for VirtualSCSIController {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        self.virtual_controller.write_fields(w)?;
        w.field("hotAddRemove", &self.hot_add_remove)?;
        w.field("sharedBus", &self.shared_bus)?;
        w.omit_empty("scsiCtlrUnitNumber", &self.scsi_ctlr_unit_number)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            virtual_controller: VirtualController::read_fields(r)?,
            hot_add_remove: r.field("hotAddRemove")?,
            shared_bus: r.field("sharedBus")?,
            scsi_ctlr_unit_number: r.field("scsiCtlrUnitNumber")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualLsiLogicController {
    pub virtual_scsi_controller: VirtualSCSIController,
}

impl WireType for VirtualLsiLogicController {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        self.virtual_scsi_controller.write_fields(w)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            virtual_scsi_controller: VirtualSCSIController::read_fields(r)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParaVirtualSCSIController {
    pub virtual_scsi_controller: VirtualSCSIController,
}

impl WireType for ParaVirtualSCSIController {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        self.virtual_scsi_controller.write_fields(w)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            virtual_scsi_controller: VirtualSCSIController::read_fields(r)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualDisk {
    pub virtual_device: VirtualDevice,
    pub capacity_in_kb: i64,
    pub capacity_in_bytes: i64,
    pub disk_object_id: String,
    pub native_unmanaged_linked_clone: Option<bool>,
}

impl WireType for VirtualDisk {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        self.virtual_device.write_fields(w)?;
        w.field("capacityInKB", &self.capacity_in_kb)?;
        w.omit_empty("capacityInBytes", &self.capacity_in_bytes)?;
        w.omit_empty("diskObjectId", &self.disk_object_id)?;
        w.field("nativeUnmanagedLinkedClone", &self.native_unmanaged_linked_clone)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            virtual_device: VirtualDevice::read_fields(r)?,
            capacity_in_kb: r.field("capacityInKB")?,
            capacity_in_bytes: r.field("capacityInBytes")?,
            disk_object_id: r.field("diskObjectId")?,
            native_unmanaged_linked_clone: r.field("nativeUnmanagedLinkedClone")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualEthernetCard {
    pub virtual_device: VirtualDevice,
    pub address_type: String,
    pub mac_address: String,
    pub wake_on_lan_enabled: Option<bool>,
    pub external_id: String,
}

impl WireType for VirtualEthernetCard {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        self.virtual_device.write_fields(w)?;
        w.omit_empty("addressType", &self.address_type)?;
        w.omit_empty("macAddress", &self.mac_address)?;
        w.field("wakeOnLanEnabled", &self.wake_on_lan_enabled)?;
        w.omit_empty("externalId", &self.external_id)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            virtual_device: VirtualDevice::read_fields(r)?,
            address_type: r.field("addressType")?,
            mac_address: r.field("macAddress")?,
            wake_on_lan_enabled: r.field("wakeOnLanEnabled")?,
            external_id: r.field("externalId")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualE1000 {
    pub virtual_ethernet_card: VirtualEthernetCard,
}

impl WireType for VirtualE1000 {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        self.virtual_ethernet_card.write_fields(w)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            virtual_ethernet_card: VirtualEthernetCard::read_fields(r)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualVmxnet {
    pub virtual_ethernet_card: VirtualEthernetCard,
}

impl WireType for VirtualVmxnet {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        self.virtual_ethernet_card.write_fields(w)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            virtual_ethernet_card: VirtualEthernetCard::read_fields(r)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualVmxnet3 {
    pub virtual_vmxnet: VirtualVmxnet,
    pub uptv2_enabled: Option<bool>,
}

impl WireType for VirtualVmxnet3 {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        self.virtual_vmxnet.write_fields(w)?;
        w.field("uptv2Enabled", &self.uptv2_enabled)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            virtual_vmxnet: VirtualVmxnet::read_fields(r)?,
            uptv2_enabled: r.field("uptv2Enabled")?,
        })
    }
}

base_accessor!(BaseVirtualDevice::{get_virtual_device, get_virtual_device_mut} -> VirtualDevice {
    VirtualDevice => self;
    VirtualController => self.virtual_device;
    VirtualSCSIController => self.virtual_controller.virtual_device;
    VirtualLsiLogicController => self.virtual_scsi_controller.virtual_controller.virtual_device;
    ParaVirtualSCSIController => self.virtual_scsi_controller.virtual_controller.virtual_device;
    VirtualDisk => self.virtual_device;
    VirtualEthernetCard => self.virtual_device;
    VirtualE1000 => self.virtual_ethernet_card.virtual_device;
    VirtualVmxnet => self.virtual_ethernet_card.virtual_device;
    VirtualVmxnet3 => self.virtual_vmxnet.virtual_ethernet_card.virtual_device;
});

base_accessor!(BaseVirtualController::{get_virtual_controller, get_virtual_controller_mut} -> VirtualController {
    VirtualController => self;
    VirtualSCSIController => self.virtual_controller;
    VirtualLsiLogicController => self.virtual_scsi_controller.virtual_controller;
    ParaVirtualSCSIController => self.virtual_scsi_controller.virtual_controller;
});

base_accessor!(BaseVirtualSCSIController::{
    get_virtual_scsi_controller, get_virtual_scsi_controller_mut
} -> VirtualSCSIController {
    VirtualSCSIController => self;
    VirtualLsiLogicController => self.virtual_scsi_controller;
    ParaVirtualSCSIController => self.virtual_scsi_controller;
});

base_accessor!(BaseVirtualEthernetCard::{
    get_virtual_ethernet_card, get_virtual_ethernet_card_mut
} -> VirtualEthernetCard {
    VirtualEthernetCard => self;
    VirtualE1000 => self.virtual_ethernet_card;
    VirtualVmxnet => self.virtual_ethernet_card;
    VirtualVmxnet3 => self.virtual_vmxnet.virtual_ethernet_card;
});

abstract_type! {
    /// Any virtual device.
    pub enum VirtualDeviceKind: VirtualDevice
        => BaseVirtualDevice::{get_virtual_device, get_virtual_device_mut}
    {
        VirtualDevice,
        VirtualController,
        VirtualSCSIController,
        VirtualLsiLogicController,
        ParaVirtualSCSIController,
        VirtualDisk,
        VirtualEthernetCard,
        VirtualE1000,
        VirtualVmxnet,
        VirtualVmxnet3,
    }
}

abstract_type! {
    pub enum VirtualControllerKind: VirtualController
        => BaseVirtualController::{get_virtual_controller, get_virtual_controller_mut}
    {
        VirtualController,
        VirtualSCSIController,
        VirtualLsiLogicController,
        ParaVirtualSCSIController,
    }
}

abstract_type! {
    pub enum VirtualEthernetCardKind: VirtualEthernetCard
        => BaseVirtualEthernetCard::{get_virtual_ethernet_card, get_virtual_ethernet_card_mut}
    {
        VirtualEthernetCard,
        VirtualE1000,
        VirtualVmxnet,
        VirtualVmxnet3,
    }
}

wire_type!(
    VirtualDeviceBackingInfo,
    VirtualDeviceFileBackingInfo,
    VirtualDiskFlatVer2BackingInfo,
    VirtualDeviceDeviceBackingInfo,
    VirtualEthernetCardNetworkBackingInfo,
    VirtualDeviceConnectInfo,
    VirtualDevice,
    VirtualController,
    VirtualSCSIController,
    VirtualLsiLogicController,
    ParaVirtualSCSIController,
    VirtualDisk,
    VirtualEthernetCard,
    VirtualE1000,
    VirtualVmxnet,
    VirtualVmxnet3,
);
