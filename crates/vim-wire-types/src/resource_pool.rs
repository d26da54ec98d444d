//! Resource pool runtime information.
//!
//! [`ResourcePoolRuntimeInfoEx`] is a newer server's extension of
//! [`ResourcePoolRuntimeInfo`]. It is not part of the default catalog; a
//! caller that expects the extended data swaps it in under the base name
//! with [`Registry::with_override`](vim_wire::Registry::with_override).

use vim_wire::{
    array_element, wire_type, ArrayOf, DecodeError, EncodeError, StructReader, StructWriter,
    WireType,
};

use crate::cluster::ManagedEntityStatus;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourcePoolResourceUsage {
    pub reservation_used: i64,
    pub reservation_used_for_vm: i64,
    pub unreserved_for_pool: i64,
    pub unreserved_for_vm: i64,
    pub overall_usage: i64,
    pub max_usage: i64,
}

impl WireType for ResourcePoolResourceUsage {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        w.field("reservationUsed", &self.reservation_used)?;
        w.field("reservationUsedForVm", &self.reservation_used_for_vm)?;
        w.field("unreservedForPool", &self.unreserved_for_pool)?;
        w.field("unreservedForVm", &self.unreserved_for_vm)?;
        w.field("overallUsage", &self.overall_usage)?;
        w.field("maxUsage", &self.max_usage)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            reservation_used: r.field("reservationUsed")?,
            reservation_used_for_vm: r.field("reservationUsedForVm")?,
            unreserved_for_pool: r.field("unreservedForPool")?,
            unreserved_for_vm: r.field("unreservedForVm")?,
            overall_usage: r.field("overallUsage")?,
            max_usage: r.field("maxUsage")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourcePoolRuntimeInfo {
    pub memory: ResourcePoolResourceUsage,
    pub cpu: ResourcePoolResourceUsage,
    pub overall_status: ManagedEntityStatus,
    pub shares_scalable: String,
}

impl WireType for ResourcePoolRuntimeInfo {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        w.field("memory", &self.memory)?;
        w.field("cpu", &self.cpu)?;
        w.field("overallStatus", &self.overall_status)?;
        w.omit_empty("sharesScalable", &self.shares_scalable)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            memory: r.field("memory")?,
            cpu: r.field("cpu")?,
            overall_status: r.field("overallStatus")?,
            shares_scalable: r.field("sharesScalable")?,
        })
    }
}

/// Reservation held by the pool for one VM resource profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourcePoolVmResourceProfileUsage {
    pub id: String,
    pub reserved_for_pool: i64,
    pub reservation_used_for_vms: i64,
    pub reservation_used_for_child_pools: i64,
}

impl WireType for ResourcePoolVmResourceProfileUsage {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        w.field("id", &self.id)?;
        w.field("reservedForPool", &self.reserved_for_pool)?;
        w.field("reservationUsedForVms", &self.reservation_used_for_vms)?;
        w.field("reservationUsedForChildPools", &self.reservation_used_for_child_pools)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: r.field("id")?,
            reserved_for_pool: r.field("reservedForPool")?,
            reservation_used_for_vms: r.field("reservationUsedForVms")?,
            reservation_used_for_child_pools: r.field("reservationUsedForChildPools")?,
        })
    }
}

/// [`ResourcePoolRuntimeInfo`] plus per-profile reservations. The profiles
/// travel inside a `vmRp` wrapper element, which is left out when there are
/// none.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourcePoolRuntimeInfoEx {
    pub resource_pool_runtime_info: ResourcePoolRuntimeInfo,
    pub vm_rp: Vec<ResourcePoolVmResourceProfileUsage>,
}

impl WireType for ResourcePoolRuntimeInfoEx {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        self.resource_pool_runtime_info.write_fields(w)?;
        if self.vm_rp.is_empty() {
            return Ok(());
        }
        w.field("vmRp", &ArrayOf::new(self.vm_rp.clone()))
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        let resource_pool_runtime_info = ResourcePoolRuntimeInfo::read_fields(r)?;
        let vm_rp: ArrayOf<ResourcePoolVmResourceProfileUsage> = r.field("vmRp")?;
        Ok(Self {
            resource_pool_runtime_info,
            vm_rp: vm_rp.items,
        })
    }
}

wire_type!(
    ResourcePoolResourceUsage,
    ResourcePoolRuntimeInfo,
    ResourcePoolVmResourceProfileUsage,
    ResourcePoolRuntimeInfoEx,
);

array_element!(ResourcePoolVmResourceProfileUsage);
