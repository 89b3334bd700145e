/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */
mod numeric_tests;
