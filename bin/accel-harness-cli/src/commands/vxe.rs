// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `accel-harness vxe` command: vector template demo.

use vxe::{
    hsum, printv_f32, printv_s32, printv_u8, vec_add, vec_mul, vec_neg, vec_slo, vec_sra,
    vec_sr, vec_xor, Float32x4, Int32x4, TargetArch, UInt8x16,
};

pub fn execute() -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║            accel-harness · Vector Template           ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let arch = TargetArch::current();
    println!(
        "  Target: {arch} ({})",
        arch.vector_facility().unwrap_or("no native vector facility")
    );
    println!();

    let test = Float32x4::new([1.0, 2.0, 3.0, 4.0]);
    println!("  test vector:");
    printv_f32(test);
    println!("  vec_add(test, test):");
    printv_f32(vec_add(test, test));
    println!("  vec_mul(test, test):");
    printv_f32(vec_mul(test, test));
    println!("  vec_neg(test):");
    printv_f32(vec_neg(test));
    println!();

    let ints = Int32x4::new([-16, 16, 256, i32::MIN]);
    let by4 = Int32x4::splat(4);
    println!("  vec_sra({:?}, 4):", ints.to_array());
    printv_s32(vec_sra(ints, by4));
    println!("  vec_sr({:?}, 4):", ints.to_array());
    printv_s32(vec_sr(ints, by4));
    println!("  vec_slo({:?}, 4):", ints.to_array());
    printv_s32(vec_slo(ints, 4));
    println!();

    let bytes = UInt8x16::new([0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
    println!("  vec_xor(bytes, 0xff):");
    printv_u8(vec_xor(bytes, UInt8x16::splat(0xff)));
    println!();

    match hsum(test) {
        Ok(sum) => println!("  hsum(test) = {sum}"),
        Err(e) => println!("  hsum(test): {e}"),
    }

    Ok(())
}
