// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `accel-harness status` command: print the accelerator queries.

use accelerator::{PreTransformedDesc, SoftNnpa, TensorAccelerator};
use device_memory::PAGE_SIZE;
use harness::AcceleratorInfo;
use std::path::Path;

pub fn execute(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let budget = config.parse_device_memory()?;
    let accel = SoftNnpa::new(budget);
    let info = AcceleratorInfo::query(&accel);

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║          accel-harness · Accelerator Status          ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    println!("  Accelerator");
    println!("   Backend:        {}", info.name);
    println!("   Installed:      {}", if info.installed { "yes" } else { "no" });
    println!("   Max dim index:  {} elements", info.max_dim_idx_size);
    println!("   Max tensor:     {} bytes", info.max_tensor_size);
    println!();

    println!("  Device Memory");
    println!("   Budget:         {budget}");
    println!("   Pages:          {} x {PAGE_SIZE} bytes", budget.pages());
    println!();

    // Footprint of one tensor of the configured shape.
    let shape = config.shape();
    let pre = PreTransformedDesc::from_shape(config.layout, config.dtype, shape);
    println!("  Staging {shape}");
    match accel.generate_transformed_desc(&pre) {
        Ok(tfm) => {
            println!("   Native size:    {} bytes per tensor", tfm.size_bytes());
            println!(
                "   Pipeline needs: {} bytes (3 tensors)",
                tfm.size_bytes() * 3
            );
        }
        Err(e) => println!("   Cannot stage:   {e}"),
    }
    println!();

    Ok(())
}
