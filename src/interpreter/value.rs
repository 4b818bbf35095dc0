/// Runtime values.
///
/// Defines the `Value` enum produced by evaluation, its display form and the
/// coercions operators rely on: conversion to number and truthiness.
pub mod core;
